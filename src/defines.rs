/*
 * Copyright (c) 2022 Shi Lei
 *
 * Use of this source code is governed by a MIT-style license
 * that can be found in the LICENSE file or
 * at https://opensource.org/licenses/MIT
 */

#![allow(dead_code)]

pub const BYTE_BITS: usize = 8;
pub const BYTES_PER_USIZE: usize = (usize::BITS / u8::BITS) as usize;

/* All payload pointers handed back to callers are multiples of this. */
pub const ALIGNMENT: usize = 8;

/* Smallest possible usable (log2-ish) size class and the number of
 * classes the index covers; mirrors the bin layout described for the
 * free-list index: classes are the ceiling log2 of the block's total
 * size, clamped into [MIN_SIZE, SIZE_LIMIT). */
pub const MIN_SIZE: usize = 5;
pub const SIZE_LIMIT: usize = 32;
pub const NUM_BINS: usize = SIZE_LIMIT - MIN_SIZE;
pub const BIN_OFFSET: usize = SIZE_LIMIT - MIN_SIZE - 1;

/* size + prev_size, both u32 */
pub const HEADER_SIZE: usize = 8;

/* A free block keeps intrusive prev/next pointers in its first two
 * usable words, so no block (free or allocated) may be smaller than
 * a header plus two pointers. */
pub const MIN_BLOCK_PAYLOAD: usize = 16;
pub const MIN_BLOCK_TOTAL: usize = HEADER_SIZE + MIN_BLOCK_PAYLOAD;
