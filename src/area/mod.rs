//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
//! Areas: rectangles in a 16×16 cell window represented as 256-bit masks.
//!
//! A mask is made of four `u64` words. Word `w` holds the cell rows
//! `4w..4w + 4`, and the cell `(x, y)` is stored in the bit
//! `(y & 3) << 4 | x` of the word `y >> 2`.
//!
//! The functions in this module operate on a four-word window
//! `sample[start..start + 4]` of a larger buffer so that samples can be
//! packed into a single allocation by the callers.
use crate::debug::ShapePrinter;

mod finder;
mod key;
mod sample;
pub use self::{finder::*, key::*, sample::*};

/// The number of `u64` words in a mask.
pub const MASK_WORDS: usize = 4;

/// A 256-bit mask.
pub type Mask = [u64; MASK_WORDS];

/// An entry of the area table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Area {
    key: AreaKey,
    /// The position in the area table.
    index: usize,
}

impl Area {
    pub(crate) fn new(key: AreaKey, index: usize) -> Self {
        Self { key, index }
    }

    #[inline]
    pub fn key(&self) -> AreaKey {
        self.key
    }

    /// The position of the area in [`area_table`]. Larger areas come first.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.key.size()
    }

    #[inline]
    pub fn mask(&self) -> Mask {
        mask(self.key)
    }

    pub fn is_included_by_sample(&self, sample: &[u64], start: usize) -> bool {
        is_included_by_sample(sample, start, self.key)
    }

    pub fn intersects(&self, other: &Area) -> bool {
        intersects(self.key, other.key)
    }

    pub fn intersects_with_sample(&self, sample: &[u64], start: usize) -> bool {
        intersects_with_sample(sample, start, self.key)
    }

    pub fn is_additive(&self, sample: &[u64], start: usize) -> bool {
        is_additive(sample, start, self.key)
    }

    pub fn set_bits(&self, target: &mut [u64], start: usize) {
        set_bits(target, start, self.key)
    }

    pub fn clear_bits(&self, target: &mut [u64], start: usize) {
        clear_bits(target, start, self.key)
    }

    pub fn print_shape(&self, printer: &mut impl ShapePrinter) {
        print_shape(self.key, printer)
    }
}

/// The bits of a single row (16 cells) covered by `key`.
#[inline]
fn row_mask(key: AreaKey) -> u64 {
    ((0xffffu32 << key.x0()) & (0xffffu32 >> (15 - key.x1()))) as u64
}

/// Compute the word `row_group` (covering the rows `4 * row_group ..
/// 4 * row_group + 4`) of the mask of `key`.
///
/// Returns `0` if the area does not intersect with these rows.
#[inline]
pub fn bits(key: AreaKey, row_group: usize) -> u64 {
    debug_assert!(row_group < MASK_WORDS, "{} < {}", row_group, MASK_WORDS);

    let y_min = (row_group as u32) << 2;
    let y_max = y_min + 3;

    let y0 = std::cmp::max(y_min, key.y0());
    let y1 = std::cmp::min(y_max, key.y1());

    if y0 > y1 {
        return 0;
    }

    let row = row_mask(key);
    let mut result = 0;
    for i in (y0 & 3)..=(y1 & 3) {
        result |= row << (i << 4);
    }
    result
}

/// Compute the full mask of `key`.
#[inline]
pub fn mask(key: AreaKey) -> Mask {
    [bits(key, 0), bits(key, 1), bits(key, 2), bits(key, 3)]
}

/// Check if every cell of `key` is set in `sample[start..start + 4]`.
pub fn is_included_by_sample(sample: &[u64], start: usize, key: AreaKey) -> bool {
    let sample = &sample[start..start + MASK_WORDS];
    let template = mask(key);
    template
        .iter()
        .zip(sample.iter())
        .all(|(&t, &s)| t & s == t)
}

/// Check if two areas share at least one cell.
pub fn intersects(key_a: AreaKey, key_b: AreaKey) -> bool {
    (0..MASK_WORDS).any(|i| bits(key_a, i) & bits(key_b, i) != 0)
}

/// Check if `key` shares at least one cell with `sample[start..start + 4]`.
pub fn intersects_with_sample(sample: &[u64], start: usize, key: AreaKey) -> bool {
    let sample = &sample[start..start + MASK_WORDS];
    (0..MASK_WORDS).any(|i| bits(key, i) & sample[i] != 0)
}

/// Check if adding `key` to `sample[start..start + 4]` would set at least
/// one new cell. This is the negation of [`is_included_by_sample`].
pub fn is_additive(sample: &[u64], start: usize, key: AreaKey) -> bool {
    let sample = &sample[start..start + MASK_WORDS];
    (0..MASK_WORDS).any(|i| bits(key, i) | sample[i] != sample[i])
}

/// Set the cells of `key` in `target[start..start + 4]`.
pub fn set_bits(target: &mut [u64], start: usize, key: AreaKey) {
    let target = &mut target[start..start + MASK_WORDS];
    for (i, word) in target.iter_mut().enumerate() {
        *word |= bits(key, i);
    }
}

/// Clear the cells of `key` in `target[start..start + 4]`.
pub fn clear_bits(target: &mut [u64], start: usize, key: AreaKey) {
    let target = &mut target[start..start + MASK_WORDS];
    for (i, word) in target.iter_mut().enumerate() {
        *word &= !bits(key, i);
    }
}

/// Render the mask of `key` with `printer`.
pub fn print_shape(key: AreaKey, printer: &mut impl ShapePrinter) {
    printer.print_shape(&mask(key));
}
