//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
use super::{clear_bits, set_bits, Area, AreaKey, Mask, MASK_WORDS};
use crate::debug::ShapePrinter;

/// A 256-bit coverage mask over a 16×16 cell window.
///
/// The sample must be cleared at the start of every independent test region;
/// it is never reset implicitly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaSample {
    bits: Mask,
}

impl AreaSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an `AreaSample` from a raw mask.
    pub fn from_bits(bits: Mask) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> &Mask {
        &self.bits
    }

    /// Set every cell in `[x0, x1] × [y0, y1]` one by one.
    ///
    /// This is slow and only meant for bulk initialization. Use
    /// [`AreaSample::fill`] on a hot path.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
        debug_assert!(x1 < 16 && y1 < 16, "{:?}", (x1, y1));
        for x in x0..=x1 {
            for y in y0..=y1 {
                let cell = (y << 4) | x;
                self.bits[(cell >> 6) as usize] |= 1u64 << (cell & 63);
            }
        }
    }

    /// Set every cell of `area`.
    pub fn fill(&mut self, area: &Area) {
        self.fill_key(area.key());
    }

    /// Clear every cell of `area`.
    pub fn remove(&mut self, area: &Area) {
        self.remove_key(area.key());
    }

    pub fn fill_key(&mut self, key: AreaKey) {
        set_bits(&mut self.bits, 0, key);
    }

    pub fn remove_key(&mut self, key: AreaKey) {
        clear_bits(&mut self.bits, 0, key);
    }

    pub fn clear(&mut self) {
        self.bits = [0; MASK_WORDS];
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// The number of set cells.
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|w| w.count_ones()).sum()
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        debug_assert!(x < 16 && y < 16, "{:?}", (x, y));
        let cell = (y << 4) | x;
        self.bits[(cell >> 6) as usize] & (1u64 << (cell & 63)) != 0
    }

    /// Check if every cell of `area` is set.
    pub fn includes(&self, area: &Area) -> bool {
        area.is_included_by_sample(&self.bits, 0)
    }

    pub fn print(&self, printer: &mut impl ShapePrinter) {
        printer.print_shape(&self.bits);
    }
}
