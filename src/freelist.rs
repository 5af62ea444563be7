/*
 * Copyright (c) 2022 Shi Lei
 *
 * Use of this source code is governed by a MIT-style license
 * that can be found in the LICENSE file or
 * at https://opensource.org/licenses/MIT
 */

//! The segregated free-list index: [`NUM_BINS`] doubly linked lists of
//! free blocks, bucketed by a ceiling-log2 size class. A free block's
//! own payload carries its list node (`prev`/`next`), so insertion and
//! removal cost no extra memory, the same trade the teacher's bucket
//! heap makes with its intrusive `ListNode`.

use crate::block::BlockHeader;
use crate::defines::{BIN_OFFSET, HEADER_SIZE, NUM_BINS};

#[repr(C)]
struct FreeNode {
    prev: *mut BlockHeader,
    next: *mut BlockHeader,
}

#[inline]
unsafe fn node_of(block: *mut BlockHeader) -> *mut FreeNode {
    BlockHeader::payload(block) as *mut FreeNode
}

/// Index of the bin a block with `payload_size` usable bytes belongs
/// to: the block's *total* size (header included) rounded down to the
/// nearest power of two, clamped into the valid bin range.
#[inline]
pub fn bin_index(payload_size: usize) -> usize {
    let total = payload_size + HEADER_SIZE;
    let clz = (total as u32).leading_zeros() as i64;
    let idx = BIN_OFFSET as i64 - clz;
    idx.clamp(0, (NUM_BINS - 1) as i64) as usize
}

pub struct FreeList {
    bins: [*mut BlockHeader; NUM_BINS],
}

impl FreeList {
    pub const fn new() -> Self {
        Self { bins: [core::ptr::null_mut(); NUM_BINS] }
    }

    /// Insert `block` at the head of its bin.
    ///
    /// This only threads the block into its bin's list; it is the
    /// caller's responsibility to have already marked the block free
    /// (the tail block has no successor header to carry that bit in,
    /// so only the allocator, which knows which block is the tail,
    /// can do that safely).
    ///
    /// # Safety
    /// `block` must point at a valid, currently-unlinked block header
    /// whose payload is large enough to hold a [`FreeNode`].
    pub unsafe fn insert(&mut self, block: *mut BlockHeader) {
        let idx = bin_index(BlockHeader::size(block));
        let head = self.bins[idx];
        let node = node_of(block);
        (*node).prev = core::ptr::null_mut();
        (*node).next = head;
        if !head.is_null() {
            (*node_of(head)).prev = block;
        }
        self.bins[idx] = block;
    }

    /// Unlink `block` from its bin. Does not touch its free/allocated
    /// bit; see [`FreeList::insert`].
    ///
    /// # Safety
    /// `block` must currently be a member of this free list.
    pub unsafe fn remove(&mut self, block: *mut BlockHeader) {
        let idx = bin_index(BlockHeader::size(block));
        let node = node_of(block);
        let prev = (*node).prev;
        let next = (*node).next;

        if !prev.is_null() {
            (*node_of(prev)).next = next;
        } else {
            self.bins[idx] = next;
        }
        if !next.is_null() {
            (*node_of(next)).prev = prev;
        }
    }

    /// Bin heads, for the sanity checker to walk.
    pub(crate) fn heads(&self) -> &[*mut BlockHeader; NUM_BINS] {
        &self.bins
    }

    /// Next block in the same bin as `block`, or null.
    ///
    /// # Safety
    /// `block` must currently be linked into some bin.
    pub(crate) unsafe fn next_in_bin(block: *mut BlockHeader) -> *mut BlockHeader {
        (*node_of(block)).next
    }

    /// First-fit within `size`'s own bin (which may hold blocks both
    /// smaller and larger than `size`, since a bin is a size *range*),
    /// falling back to the first block of any strictly larger bin.
    ///
    /// # Safety
    /// Every block reachable through this free list must be valid.
    pub unsafe fn find(&self, size: usize) -> Option<*mut BlockHeader> {
        let idx = bin_index(size);
        let mut block = self.bins[idx];
        while !block.is_null() {
            if BlockHeader::size(block) >= size {
                return Some(block);
            }
            block = (*node_of(block)).next;
        }

        for bin in self.bins.iter().skip(idx + 1) {
            if !bin.is_null() {
                return Some(*bin);
            }
        }
        None
    }
}
