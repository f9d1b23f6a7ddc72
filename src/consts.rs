//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
//! The geometry of the tile pyramid and the fixed-point model.
//!
//! Everything here is derived from four axioms: the low tile diameter
//! (`1 << TILE_AXIS_SHIFT` pixels), the number of mid tiles on each row
//! (`MID_WIDTH`), the number of mid tile rows (`MIDDLE_HEIGHT`), and the
//! number of fractional bits of a precise pixel coordinate
//! (`PRECISION_BITS`).
//!
//! A low tile is made of 8x8 pixels, a mid tile of 8x8 low tiles, and a top
//! tile of 8x8 mid tiles. Each level is stored as one `u64` per tile.

pub const TILE_AXIS_SHIFT: u32 = 3;
pub const TILE_PIXEL_DIAMETER: i32 = 1 << TILE_AXIS_SHIFT;
pub const TILE_PIXEL_INDEX_MASK: i32 = TILE_PIXEL_DIAMETER - 1;
pub const TILE_PIXEL_INVERSE_MASK: i32 = !TILE_PIXEL_INDEX_MASK;
pub const LOW_AXIS_SHIFT: u32 = TILE_AXIS_SHIFT;
pub const MID_AXIS_SHIFT: u32 = TILE_AXIS_SHIFT * 2;
pub const MID_INDEX_SHIFT: u32 = LOW_AXIS_SHIFT * 2;
pub const TOP_INDEX_SHIFT: u32 = MID_INDEX_SHIFT * 2;

/// The number of mid tiles on each row.
pub const MID_WIDTH: usize = 16;
pub const MID_Y_SHIFT: u32 = (MID_WIDTH as u32 - 1).count_ones();
/// The number of mid tile rows.
pub const MIDDLE_HEIGHT: usize = 8;

/// The number of top tiles on each row.
pub const TOP_WIDTH: usize = MID_WIDTH / 8;
pub const TOP_Y_SHIFT: u32 = (TOP_WIDTH as u32 - 1).count_ones();
/// The number of top tile rows.
pub const TOP_HEIGHT: usize = (MIDDLE_HEIGHT + 7) / 8;

pub const PRECISION_BITS: u32 = 4;
pub const PRECISE_FRACTION_MASK: i32 = (1 << PRECISION_BITS) - 1;
pub const PRECISE_INTEGER_MASK: i32 = !PRECISE_FRACTION_MASK;
pub const PRECISE_PIXEL_SIZE: i32 = 1 << PRECISION_BITS;
pub const PRECISE_PIXEL_CENTER: i32 = PRECISE_PIXEL_SIZE / 2;

/// The number of low tiles on each row.
pub const LOW_WIDTH: usize = MID_WIDTH * 8;
pub const PIXEL_WIDTH: i32 = LOW_WIDTH as i32 * TILE_PIXEL_DIAMETER;
pub const MAX_PIXEL_X: i32 = PIXEL_WIDTH - 1;
pub const HALF_PIXEL_WIDTH: i32 = PIXEL_WIDTH / 2;
pub const PRECISE_WIDTH: i32 = PIXEL_WIDTH << PRECISION_BITS;
pub const HALF_PRECISE_WIDTH: i32 = PRECISE_WIDTH / 2;
/// Clamp to this to ensure a value plus a half pixel never rounds into a
/// pixel past the last one.
pub const PRECISE_WIDTH_CLAMP: i32 = PRECISE_WIDTH - PRECISE_PIXEL_CENTER;

/// The number of low tile rows.
pub const LOW_HEIGHT: usize = MIDDLE_HEIGHT * 8;
pub const PIXEL_HEIGHT: i32 = LOW_HEIGHT as i32 * TILE_PIXEL_DIAMETER;
pub const MAX_PIXEL_Y: i32 = PIXEL_HEIGHT - 1;
pub const HALF_PIXEL_HEIGHT: i32 = PIXEL_HEIGHT / 2;
pub const PRECISE_HEIGHT: i32 = PIXEL_HEIGHT << PRECISION_BITS;
pub const HALF_PRECISE_HEIGHT: i32 = PRECISE_HEIGHT / 2;
/// Clamp to this to ensure a value plus a half pixel never rounds into a
/// pixel past the last one.
pub const PRECISE_HEIGHT_CLAMP: i32 = PRECISE_HEIGHT - PRECISE_PIXEL_CENTER;

/// The margin (in precise units) around the viewport. Projected coordinates
/// are clamped to the guard band before conversion to integers so that
/// geometry near the camera never wraps around.
pub const GUARD_SIZE: i32 = 512 << PRECISION_BITS;
pub const GUARD_WIDTH: i32 = PRECISE_WIDTH + GUARD_SIZE;
pub const GUARD_HEIGHT: i32 = PRECISE_HEIGHT + GUARD_SIZE;

pub const LOW_TILE_COUNT: usize = LOW_WIDTH * LOW_HEIGHT;
pub const MID_TILE_COUNT: usize = MID_WIDTH * MIDDLE_HEIGHT;
pub const TOP_TILE_COUNT: usize = TOP_WIDTH * TOP_HEIGHT;

pub const MID_TILE_PIXEL_DIAMETER: i32 = PIXEL_WIDTH / MID_WIDTH as i32;
pub const MID_TILE_PIXEL_INDEX_MASK: i32 = MID_TILE_PIXEL_DIAMETER - 1;

pub const LOW_TILE_PIXEL_DIAMETER: i32 = PIXEL_WIDTH / LOW_WIDTH as i32;
pub const LOW_TILE_PIXEL_INDEX_MASK: i32 = LOW_TILE_PIXEL_DIAMETER - 1;

/// The number of fractional bits of a camera-relative coordinate.
pub const CAMERA_PRECISION_BITS: u32 = 12;
pub const CAMERA_PRECISION_UNITY: i32 = 1 << CAMERA_PRECISION_BITS;
/// One chunk (16 blocks) in camera precision.
pub const CAMERA_PRECISION_CHUNK_MAX: i32 = 16 * CAMERA_PRECISION_UNITY;
