//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
//! Area keys.
use itertools::iproduct;
use std::fmt;

/// The number of cells on each side of the area window.
pub const AREA_DIAMETER: u32 = 16;

/// The number of valid area keys.
pub const AREA_COUNT: usize = (AREA_DIAMETER * (AREA_DIAMETER + 1) / 2).pow(2) as usize;

/// An axis-aligned rectangle `[x0, x1] × [y0, y1]` in a 16×16 cell window,
/// packed into 16 bits as `x0 | y0 << 4 | x1 << 8 | y1 << 12`.
///
/// A value of this type always satisfies `x0 ≤ x1` and `y0 ≤ y1`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaKey(u16);

impl AreaKey {
    /// Construct an `AreaKey`. Bounds are inclusive.
    ///
    /// The bounds must be valid. This is only checked in a debug build; use
    /// [`AreaKey::checked`] for untrusted input.
    #[inline]
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        debug_assert!(
            x0 <= x1 && x1 < AREA_DIAMETER && y0 <= y1 && y1 < AREA_DIAMETER,
            "invalid area bounds: {:?}",
            (x0, y0, x1, y1)
        );
        AreaKey((x0 | (y0 << 4) | (x1 << 8) | (y1 << 12)) as u16)
    }

    /// Construct an `AreaKey`, returning `None` if the bounds are invalid.
    pub fn checked(x0: u32, y0: u32, x1: u32, y1: u32) -> Option<Self> {
        if x0 <= x1 && x1 < AREA_DIAMETER && y0 <= y1 && y1 < AREA_DIAMETER {
            Some(Self::new(x0, y0, x1, y1))
        } else {
            None
        }
    }

    /// Reinterpret a packed value, returning `None` if it does not describe
    /// a valid rectangle.
    pub fn from_raw(raw: u16) -> Option<Self> {
        let raw = raw as u32;
        Self::checked(raw & 15, (raw >> 4) & 15, (raw >> 8) & 15, raw >> 12)
    }

    /// Get the packed representation.
    #[inline]
    pub fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn x0(self) -> u32 {
        self.0 as u32 & 15
    }

    #[inline]
    pub fn y0(self) -> u32 {
        (self.0 as u32 >> 4) & 15
    }

    #[inline]
    pub fn x1(self) -> u32 {
        (self.0 as u32 >> 8) & 15
    }

    #[inline]
    pub fn y1(self) -> u32 {
        self.0 as u32 >> 12
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.x1() - self.x0() + 1
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.y1() - self.y0() + 1
    }

    /// The number of cells covered by the area.
    #[inline]
    pub fn size(self) -> u32 {
        self.width() * self.height()
    }

    /// Check if the cell `(x, y)` is inside the area.
    #[inline]
    pub fn contains(self, x: u32, y: u32) -> bool {
        x >= self.x0() && x <= self.x1() && y >= self.y0() && y <= self.y1()
    }

    /// Iterate through all valid keys.
    pub fn all() -> impl Iterator<Item = Self> {
        iproduct!(0..AREA_DIAMETER, 0..AREA_DIAMETER, 0..AREA_DIAMETER, 0..AREA_DIAMETER)
            .filter_map(|(y0, y1, x0, x1)| Self::checked(x0, y0, x1, y1))
    }
}

impl fmt::Debug for AreaKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "AreaKey([{}, {}]×[{}, {}])",
            self.x0(),
            self.x1(),
            self.y0(),
            self.y1()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_roundtrip() {
        let key = AreaKey::new(1, 2, 13, 15);
        assert_eq!(
            (key.x0(), key.y0(), key.x1(), key.y1()),
            (1, 2, 13, 15)
        );
        assert_eq!(key.width(), 13);
        assert_eq!(key.height(), 14);
        assert_eq!(key.size(), 13 * 14);
    }

    #[test]
    fn checked_rejects_inverted_bounds() {
        assert_eq!(AreaKey::checked(3, 0, 2, 0), None);
        assert_eq!(AreaKey::checked(0, 5, 0, 4), None);
        assert_eq!(AreaKey::checked(0, 0, 16, 0), None);
        assert!(AreaKey::checked(15, 15, 15, 15).is_some());
    }

    #[test]
    fn from_raw_validates() {
        let key = AreaKey::new(4, 5, 6, 7);
        assert_eq!(AreaKey::from_raw(key.raw()), Some(key));
        // x0 = 1, x1 = 0
        assert_eq!(AreaKey::from_raw(0x0001), None);
    }

    #[test]
    fn all_keys() {
        let keys: Vec<_> = AreaKey::all().collect();
        assert_eq!(keys.len(), AREA_COUNT);
        assert_eq!(AREA_COUNT, 18496);
        let mut raw: Vec<_> = keys.iter().map(|k| k.raw()).collect();
        raw.sort();
        raw.dedup();
        assert_eq!(raw.len(), AREA_COUNT);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn new_panics_on_invalid_bounds() {
        AreaKey::new(5, 0, 4, 0);
    }
}
