//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
//! The hierarchical coverage raster.
//!
//! The raster is a pyramid of three levels, each stored as one `u64` per
//! tile:
//!
//!  - A *low* word holds the coverage of 8×8 pixels. The pixel `(x, y)` (local
//!    to the tile) is the bit `y << 3 | x`.
//!  - A *mid* word summarizes 8×8 low tiles. A bit is set iff the
//!    corresponding low tile is fully covered.
//!  - A *top* word summarizes 8×8 mid tiles in the same way.
//!
//! Both filling and querying traverse the pyramid top-down and skip every
//! tile whose summary bit is already set.
use itertools::iproduct;
use std::cmp::{max, min};

use crate::{
    consts::{
        LOW_HEIGHT, LOW_TILE_COUNT, LOW_WIDTH, MID_TILE_COUNT, MID_WIDTH, TILE_AXIS_SHIFT,
        TILE_PIXEL_INDEX_MASK, TOP_HEIGHT, TOP_TILE_COUNT, TOP_WIDTH,
    },
    debug::format_tile,
};

mod rect;
pub use self::rect::*;

/// A coverage raster of `PIXEL_WIDTH × PIXEL_HEIGHT` pixels.
#[derive(Clone)]
pub struct CoverageRaster {
    low: Vec<u64>,
    mid: Vec<u64>,
    top: [u64; TOP_TILE_COUNT],
}

impl std::fmt::Debug for CoverageRaster {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("CoverageRaster")
            .field("covered_pixels", &self.covered_pixels())
            .field("top", &self.top)
            .finish()
    }
}

impl Default for CoverageRaster {
    fn default() -> Self {
        Self::new()
    }
}

/// The bit representing the child `(x, y)` (in the child level's own
/// coordinates) in its parent's word.
#[inline]
fn child_bit(x: i32, y: i32) -> u64 {
    1u64 << (((y & 7) << 3) | (x & 7))
}

/// Clip the child range `[lo, hi]` to the children of the parent tile `t`.
#[inline]
fn clip_children(lo: i32, hi: i32, t: i32) -> std::ops::RangeInclusive<i32> {
    max(lo, t << 3)..=min(hi, (t << 3) | 7)
}

/// Compute the mask of the pixels `[x0, x1] × [y0, y1]` in a low tile. All
/// bounds must be in `0..8`.
#[inline]
fn tile_mask(x0: i32, y0: i32, x1: i32, y1: i32) -> u64 {
    debug_assert!(0 <= x0 && x0 <= x1 && x1 < 8, "{:?}", (x0, x1));
    debug_assert!(0 <= y0 && y0 <= y1 && y1 < 8, "{:?}", (y0, y1));

    let row = (0xffu64 << x0) & (0xffu64 >> (7 - x1));
    let rows = (0xffff_ffff_ffff_ffffu64 << (y0 << 3)) & (!0u64 >> ((7 - y1) << 3));
    // Replicate `row` into every row, then keep the rows in `[y0, y1]`
    (row * 0x0101_0101_0101_0101) & rows
}

/// The pixel mask of the low tile `(lx, ly)` clipped to `rect`.
#[inline]
fn low_tile_mask(rect: &PixelRect, lx: i32, ly: i32) -> u64 {
    let (tx0, ty0) = (lx << TILE_AXIS_SHIFT, ly << TILE_AXIS_SHIFT);
    let x0 = max(rect.x0, tx0) & TILE_PIXEL_INDEX_MASK;
    let y0 = max(rect.y0, ty0) & TILE_PIXEL_INDEX_MASK;
    let x1 = min(rect.x1, tx0 + TILE_PIXEL_INDEX_MASK) & TILE_PIXEL_INDEX_MASK;
    let y1 = min(rect.y1, ty0 + TILE_PIXEL_INDEX_MASK) & TILE_PIXEL_INDEX_MASK;
    tile_mask(x0, y0, x1, y1)
}

/// The ranges of tiles of each level touched by a `PixelRect`.
struct TileSpans {
    low: [i32; 4],
    mid: [i32; 4],
    top: [i32; 4],
}

impl TileSpans {
    fn new(rect: &PixelRect) -> Self {
        let low = [
            rect.x0 >> TILE_AXIS_SHIFT,
            rect.y0 >> TILE_AXIS_SHIFT,
            rect.x1 >> TILE_AXIS_SHIFT,
            rect.y1 >> TILE_AXIS_SHIFT,
        ];
        let mid = [low[0] >> 3, low[1] >> 3, low[2] >> 3, low[3] >> 3];
        let top = [mid[0] >> 3, mid[1] >> 3, mid[2] >> 3, mid[3] >> 3];
        Self { low, mid, top }
    }
}

impl CoverageRaster {
    /// Construct an empty `CoverageRaster`.
    pub fn new() -> Self {
        Self {
            low: vec![0; LOW_TILE_COUNT],
            mid: vec![0; MID_TILE_COUNT],
            top: [0; TOP_TILE_COUNT],
        }
    }

    /// Mark every pixel as uncovered. Must be called at the start of every
    /// frame.
    pub fn clear(&mut self) {
        for x in self.low.iter_mut() {
            *x = 0;
        }
        for x in self.mid.iter_mut() {
            *x = 0;
        }
        self.top = [0; TOP_TILE_COUNT];
    }

    /// Mark every pixel in `rect` as covered.
    pub fn fill(&mut self, rect: &PixelRect) {
        let spans = TileSpans::new(rect);
        let [lx0, ly0, lx1, ly1] = spans.low;
        let [mx0, my0, mx1, my1] = spans.mid;
        let [tx0, ty0, tx1, ty1] = spans.top;

        for (ty, tx) in iproduct!(ty0..=ty1, tx0..=tx1) {
            let top_index = ty as usize * TOP_WIDTH + tx as usize;

            for (my, mx) in iproduct!(clip_children(my0, my1, ty), clip_children(mx0, mx1, tx)) {
                let mid_bit = child_bit(mx, my);
                if self.top[top_index] & mid_bit != 0 {
                    continue;
                }

                let mid_index = my as usize * MID_WIDTH + mx as usize;

                for (ly, lx) in
                    iproduct!(clip_children(ly0, ly1, my), clip_children(lx0, lx1, mx))
                {
                    let low_bit = child_bit(lx, ly);
                    if self.mid[mid_index] & low_bit != 0 {
                        continue;
                    }

                    let low = &mut self.low[ly as usize * LOW_WIDTH + lx as usize];
                    *low |= low_tile_mask(rect, lx, ly);

                    if *low == !0 {
                        self.mid[mid_index] |= low_bit;
                    }
                }

                if self.mid[mid_index] == !0 {
                    self.top[top_index] |= mid_bit;
                }
            }
        }
    }

    /// Check if every pixel in `rect` is covered.
    pub fn is_covered(&self, rect: &PixelRect) -> bool {
        let spans = TileSpans::new(rect);
        let [lx0, ly0, lx1, ly1] = spans.low;
        let [mx0, my0, mx1, my1] = spans.mid;
        let [tx0, ty0, tx1, ty1] = spans.top;

        for (ty, tx) in iproduct!(ty0..=ty1, tx0..=tx1) {
            let top = self.top[ty as usize * TOP_WIDTH + tx as usize];
            if top == !0 {
                continue;
            }

            for (my, mx) in iproduct!(clip_children(my0, my1, ty), clip_children(mx0, mx1, tx)) {
                if top & child_bit(mx, my) != 0 {
                    continue;
                }

                let mid = self.mid[my as usize * MID_WIDTH + mx as usize];

                for (ly, lx) in
                    iproduct!(clip_children(ly0, ly1, my), clip_children(lx0, lx1, mx))
                {
                    if mid & child_bit(lx, ly) != 0 {
                        continue;
                    }

                    let mask = low_tile_mask(rect, lx, ly);
                    if self.low[ly as usize * LOW_WIDTH + lx as usize] & mask != mask {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Check if every pixel of the raster is covered.
    pub fn is_full(&self) -> bool {
        self.top.iter().all(|&x| x == !0)
    }

    /// Count the covered pixels.
    pub fn covered_pixels(&self) -> u32 {
        self.low.iter().map(|x| x.count_ones()).sum()
    }

    /// Get the word of the low tile `(lx, ly)`.
    pub fn low_tile(&self, lx: usize, ly: usize) -> u64 {
        self.low[ly * LOW_WIDTH + lx]
    }

    /// Get the word of the mid tile `(mx, my)`.
    pub fn mid_tile(&self, mx: usize, my: usize) -> u64 {
        self.mid[my * MID_WIDTH + mx]
    }

    /// Get the word of the top tile `(tx, ty)`.
    pub fn top_tile(&self, tx: usize, ty: usize) -> u64 {
        self.top[ty * TOP_WIDTH + tx]
    }

    /// Render the raster at the low tile granularity, one character per low
    /// tile: `#` (fully covered), `+` (partially covered), or `.` (empty).
    pub fn format_low_level(&self) -> String {
        let mut out = String::with_capacity((LOW_WIDTH + 1) * LOW_HEIGHT);
        for ly in 0..LOW_HEIGHT {
            for lx in 0..LOW_WIDTH {
                let word = self.low_tile(lx, ly);
                out.push(match word {
                    0 => '.',
                    x if x == !0 => '#',
                    _ => '+',
                });
            }
            out.push('\n');
        }
        out
    }

    /// Render every top tile as an 8×8 grid of its mid tiles, `#` marking a
    /// fully covered one.
    pub fn format_top_level(&self) -> String {
        let mut out = String::new();
        for (ty, tx) in iproduct!(0..TOP_HEIGHT, 0..TOP_WIDTH) {
            out.push_str(&format!("top ({}, {}):\n", tx, ty));
            out.push_str(&format_tile(self.top_tile(tx, ty)));
        }
        out
    }
}
