//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
use std::cmp::{max, min};

use crate::consts::{
    MAX_PIXEL_X, MAX_PIXEL_Y, PRECISE_HEIGHT, PRECISE_HEIGHT_CLAMP, PRECISE_PIXEL_CENTER,
    PRECISE_WIDTH, PRECISE_WIDTH_CLAMP, PRECISION_BITS,
};

/// An axis-aligned rectangle in precise (fixed-point) pixel coordinates.
/// Bounds are inclusive and may extend into the guard band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreciseRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

/// An axis-aligned rectangle in whole pixels. Bounds are inclusive and
/// always inside the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub(crate) x0: i32,
    pub(crate) y0: i32,
    pub(crate) x1: i32,
    pub(crate) y1: i32,
}

impl PreciseRect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        debug_assert!(x0 <= x1 && y0 <= y1, "{:?}", (x0, y0, x1, y1));
        Self { x0, y0, x1, y1 }
    }

    /// Get the smallest set of whole pixels touched by `self`.
    ///
    /// Use this for visibility queries. Returns `None` if `self` is entirely
    /// outside the raster.
    pub fn outer_pixels(&self) -> Option<PixelRect> {
        let (x0, x1) = clamp_span(self.x0, self.x1, PRECISE_WIDTH, PRECISE_WIDTH_CLAMP)?;
        let (y0, y1) = clamp_span(self.y0, self.y1, PRECISE_HEIGHT, PRECISE_HEIGHT_CLAMP)?;

        Some(PixelRect {
            x0: x0 >> PRECISION_BITS,
            y0: y0 >> PRECISION_BITS,
            x1: x1 >> PRECISION_BITS,
            y1: y1 >> PRECISION_BITS,
        })
    }

    /// Get the set of whole pixels whose centers are inside `self`.
    ///
    /// Use this for occluders. Returns `None` if no pixel center is covered.
    pub fn inner_pixels(&self) -> Option<PixelRect> {
        // A span starting past the last pixel center covers no center
        let (x0, x1) = clamp_span(self.x0, self.x1, PRECISE_WIDTH_CLAMP + 1, PRECISE_WIDTH_CLAMP)?;
        let (y0, y1) =
            clamp_span(self.y0, self.y1, PRECISE_HEIGHT_CLAMP + 1, PRECISE_HEIGHT_CLAMP)?;

        let rect = PixelRect {
            x0: (x0 + PRECISE_PIXEL_CENTER - 1) >> PRECISION_BITS,
            y0: (y0 + PRECISE_PIXEL_CENTER - 1) >> PRECISION_BITS,
            x1: (x1 - PRECISE_PIXEL_CENTER) >> PRECISION_BITS,
            y1: (y1 - PRECISE_PIXEL_CENTER) >> PRECISION_BITS,
        };

        if rect.x0 > rect.x1 || rect.y0 > rect.y1 {
            None
        } else {
            Some(rect)
        }
    }
}

/// Clamp `[v0, v1]` to `[0, limit]`, returning `None` if it is disjoint from
/// `[0, extent)`.
fn clamp_span(v0: i32, v1: i32, extent: i32, limit: i32) -> Option<(i32, i32)> {
    debug_assert!(limit < extent);
    if v1 < 0 || v0 >= extent {
        None
    } else {
        Some((min(max(v0, 0), limit), min(v1, limit)))
    }
}

impl PixelRect {
    /// Construct a `PixelRect`. Bounds are inclusive.
    ///
    /// Panics if the rectangle is empty or not inside the raster.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        assert!(
            0 <= x0 && x0 <= x1 && x1 <= MAX_PIXEL_X && 0 <= y0 && y0 <= y1 && y1 <= MAX_PIXEL_Y,
            "pixel rect out of range: {:?}",
            (x0, y0, x1, y1)
        );
        Self { x0, y0, x1, y1 }
    }

    /// The rectangle covering the whole raster.
    pub fn full() -> Self {
        Self::new(0, 0, MAX_PIXEL_X, MAX_PIXEL_Y)
    }

    pub fn x0(&self) -> i32 {
        self.x0
    }
    pub fn y0(&self) -> i32 {
        self.y0
    }
    pub fn x1(&self) -> i32 {
        self.x1
    }
    pub fn y1(&self) -> i32 {
        self.y1
    }

    /// The number of pixels.
    pub fn area(&self) -> u32 {
        ((self.x1 - self.x0 + 1) * (self.y1 - self.y0 + 1)) as u32
    }

    pub fn contains_rect(&self, other: &PixelRect) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && self.x1 >= other.x1 && self.y1 >= other.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GUARD_HEIGHT, GUARD_SIZE, GUARD_WIDTH, PRECISE_PIXEL_SIZE};

    #[test]
    fn outer_pixels_sanity() {
        let rect = PreciseRect::new(17, 0, 47, 15).outer_pixels().unwrap();
        assert_eq!((rect.x0, rect.y0, rect.x1, rect.y1), (1, 0, 2, 0));
    }

    #[test]
    fn inner_pixels_sanity() {
        // Pixel 1 spans [16, 32) and has its center at 24
        assert_eq!(PreciseRect::new(24, 24, 24, 24).inner_pixels().map(|r| r.x0), Some(1));
        assert_eq!(PreciseRect::new(25, 24, 39, 24).inner_pixels(), None);
        let rect = PreciseRect::new(8, 8, 40, 56).inner_pixels().unwrap();
        assert_eq!((rect.x0, rect.y0, rect.x1, rect.y1), (0, 0, 2, 3));
    }

    #[test]
    fn inner_is_inside_outer() {
        for &(x0, x1) in &[(0, 100), (7, 9), (13, 250), (-40, 77), (16000, 17000)] {
            let rect = PreciseRect::new(x0, x0, x1, x1);
            if let Some(inner) = rect.inner_pixels() {
                assert!(rect.outer_pixels().unwrap().contains_rect(&inner), "{:?}", rect);
            }
        }
    }

    #[test]
    fn guard_band_extremes_stay_in_raster() {
        let rect = PreciseRect::new(-GUARD_SIZE, -GUARD_SIZE, GUARD_WIDTH, GUARD_HEIGHT);
        assert_eq!(rect.outer_pixels(), Some(PixelRect::full()));
        assert_eq!(rect.inner_pixels(), Some(PixelRect::full()));
    }

    #[test]
    fn outside_is_none() {
        let rect = PreciseRect::new(-GUARD_SIZE, 0, -1, PRECISE_PIXEL_SIZE);
        assert_eq!(rect.outer_pixels(), None);
        assert_eq!(rect.inner_pixels(), None);
        let rect = PreciseRect::new(0, GUARD_HEIGHT - 1, 10, GUARD_HEIGHT);
        assert_eq!(rect.outer_pixels(), None);
    }

    #[test]
    fn last_half_pixel_is_touched() {
        // Starts after the center of the last column
        let rect = PreciseRect::new(PRECISE_WIDTH - 6, 100, PRECISE_WIDTH - 2, 200);
        let outer = rect.outer_pixels().unwrap();
        assert_eq!((outer.x0, outer.x1), (MAX_PIXEL_X, MAX_PIXEL_X));
        assert_eq!(rect.inner_pixels(), None);

        let rect = PreciseRect::new(100, PRECISE_HEIGHT - 7, 200, PRECISE_HEIGHT + 40);
        let outer = rect.outer_pixels().unwrap();
        assert_eq!((outer.y0, outer.y1), (MAX_PIXEL_Y, MAX_PIXEL_Y));
        assert_eq!(rect.inner_pixels(), None);

        // Just past the raster
        let rect = PreciseRect::new(PRECISE_WIDTH, 0, PRECISE_WIDTH + 5, 10);
        assert_eq!(rect.outer_pixels(), None);
    }

    #[test]
    fn last_pixel_center_is_inner() {
        let c = PRECISE_WIDTH_CLAMP;
        let inner = PreciseRect::new(c, 0, c + 7, 15).inner_pixels().unwrap();
        assert_eq!((inner.x0, inner.x1), (MAX_PIXEL_X, MAX_PIXEL_X));
    }

    #[test]
    #[should_panic]
    fn pixel_rect_rejects_out_of_range() {
        PixelRect::new(0, 0, MAX_PIXEL_X + 1, 0);
    }
}
