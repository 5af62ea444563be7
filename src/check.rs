/*
 * Copyright (c) 2022 Shi Lei
 *
 * Use of this source code is governed by a MIT-style license
 * that can be found in the LICENSE file or
 * at https://opensource.org/licenses/MIT
 */

//! A sanity checker over the whole heap, for tests and debugging only:
//! walks every block from `heap_lo` to `heap_hi` verifying the header
//! chain lands exactly on the end of the mapped region, that no two
//! free blocks sit next to each other uncoalesced, and that the
//! free-list index agrees with what each block's header actually says.
//! Never called from the hot allocate/free/reallocate path.

use crate::allocator::Allocator;
use crate::block::BlockHeader;
use crate::defines::HEADER_SIZE;
use crate::dprintf;
use crate::freelist::{bin_index, FreeList};
use crate::primitive::HeapPrimitive;

impl<H: HeapPrimitive> Allocator<H> {
    /// Verify every heap invariant this allocator relies on. Returns
    /// `Ok(())` if the heap is consistent, printing a diagnostic for
    /// each violation found before returning an error.
    pub fn check(&self) -> Result<(), crate::errors::AllocError> {
        let mut ok = self.check_block_chain();
        ok &= self.check_free_lists();
        if ok {
            Ok(())
        } else {
            Err(crate::errors::AllocError::BadState)
        }
    }

    fn check_block_chain(&self) -> bool {
        let Some(top) = self.top else { return true };
        let mut ok = true;
        // the leading sentinel at heap_lo has size 0, so walking from
        // heap_lo naturally steps over it without special-casing
        let mut cursor = self.heap.heap_lo() as *mut BlockHeader;
        let mut prev_was_free = false;

        while cursor != top {
            let size = unsafe { BlockHeader::size(cursor) };
            let free = unsafe { BlockHeader::is_free(cursor) };

            if prev_was_free && free {
                dprintf!("check: two adjacent free blocks, the one at {:p} was not coalesced\n", cursor);
                ok = false;
            }
            prev_was_free = free;

            let block_end = cursor as usize + HEADER_SIZE + size;
            let end = self.heap.heap_hi() as usize + 1;
            if block_end > end {
                dprintf!("check: block at {:p} (size {}) overruns the heap\n", cursor, size);
                ok = false;
                break;
            }
            cursor = unsafe { BlockHeader::next_header(cursor) };
        }

        let top_end = top as usize + HEADER_SIZE;
        let heap_end = self.heap.heap_hi() as usize + 1;
        if cursor == top && top_end != heap_end {
            dprintf!("check: sentinel at {:p} ends at {:#x}, heap ends at {:#x}\n", top, top_end, heap_end);
            ok = false;
        }
        ok
    }

    fn check_free_lists(&self) -> bool {
        let mut ok = true;
        for (idx, &head) in self.free_lists.heads().iter().enumerate() {
            let mut block = head;
            while !block.is_null() {
                unsafe {
                    if !BlockHeader::is_free(block) {
                        dprintf!("check: block {:p} listed in bin {} is not marked free\n", block, idx);
                        ok = false;
                    }
                    let size = BlockHeader::size(block);
                    if bin_index(size) != idx {
                        dprintf!("check: block {:p} (size {}) belongs in bin {}, found in bin {}\n",
                            block, size, bin_index(size), idx);
                        ok = false;
                    }
                    block = FreeList::next_in_bin(block);
                }
            }
        }
        ok
    }
}
