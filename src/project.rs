//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
//! Projection of chunk-local boxes into the coverage raster.
//!
//! Chunk origins are first made relative to the camera and quantized to
//! `CAMERA_PRECISION_BITS` fractional bits, so that the corners shared by
//! adjacent chunks always project to the same point regardless of the
//! distance from the world origin.
use arrayvec::ArrayVec;
use cgmath::{vec2, vec4, Matrix4, Point3, SquareMatrix, Vector2, Vector3};

use crate::{
    consts::{
        CAMERA_PRECISION_BITS, CAMERA_PRECISION_CHUNK_MAX, CAMERA_PRECISION_UNITY, GUARD_HEIGHT,
        GUARD_SIZE, GUARD_WIDTH, HALF_PRECISE_HEIGHT, HALF_PRECISE_WIDTH, PRECISE_HEIGHT,
        PRECISE_WIDTH,
    },
    raster::PreciseRect,
    utils::geom::{convex_hull, inscribed_rect},
};

/// The number of attempts made by `Projector::project_occluder` to shrink an
/// occluder's bounding rectangle into its silhouette.
const INSCRIBE_STEPS: u32 = 8;

/// An axis-aligned box in chunk-local block coordinates. `min` is inclusive
/// and `max` exclusive, so a full chunk is `[0, 0, 0]..[16, 16, 16]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalBox {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl LocalBox {
    /// The box spanning a whole chunk.
    pub const FULL: LocalBox = LocalBox {
        min: [0; 3],
        max: [16; 3],
    };

    /// Construct a `LocalBox`.
    ///
    /// Panics if the box is empty or exceeds the chunk.
    pub fn new(min: [u8; 3], max: [u8; 3]) -> Self {
        assert!(
            (0..3).all(|i| min[i] < max[i] && max[i] <= 16),
            "invalid box: {:?}",
            (min, max)
        );
        Self { min, max }
    }

    fn corners_fixed(&self) -> [Vector3<i32>; 8] {
        let unity = CAMERA_PRECISION_UNITY;
        let lo = Vector3::new(self.min[0] as i32, self.min[1] as i32, self.min[2] as i32) * unity;
        let hi = Vector3::new(self.max[0] as i32, self.max[1] as i32, self.max[2] as i32) * unity;
        debug_assert!(hi.x <= CAMERA_PRECISION_CHUNK_MAX);
        debug_assert!(hi.y <= CAMERA_PRECISION_CHUNK_MAX);
        debug_assert!(hi.z <= CAMERA_PRECISION_CHUNK_MAX);
        [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// The result of `Projector::project_box`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// The box is entirely outside the viewport.
    Outside,
    /// The box touches or crosses the near plane. It can neither be culled
    /// nor serve as an occluder.
    NearClipped,
    /// The bounding rectangle of the projected box, clamped to the guard band.
    Rect(PreciseRect),
}

/// Projects chunk-local boxes into precise pixel coordinates.
#[derive(Debug, Clone)]
pub struct Projector {
    /// Maps camera-relative world coordinates to the clip space.
    view_projection: Matrix4<f32>,
    camera: Point3<f64>,
    near_w: f32,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(1.0e-3)
    }
}

impl Projector {
    /// Construct a `Projector`. A projected point is considered near-clipped
    /// if its clip space W coordinate is not greater than `near_w`.
    pub fn new(near_w: f32) -> Self {
        Self {
            view_projection: Matrix4::identity(),
            camera: Point3::new(0.0, 0.0, 0.0),
            near_w,
        }
    }

    /// Update the camera.
    ///
    /// `view_projection` must map coordinates relative to `camera` (i.e., with
    /// the camera at the origin) to the clip space.
    pub fn set_camera(&mut self, view_projection: Matrix4<f32>, camera: Point3<f64>) {
        self.view_projection = view_projection;
        self.camera = camera;
    }

    pub fn camera(&self) -> Point3<f64> {
        self.camera
    }

    /// Get the chunk origin relative to the camera in camera precision.
    ///
    /// The result is 64-bit because it overflows `i32` for chunks about
    /// 2^19 blocks away from the camera.
    pub fn camera_offset(&self, chunk_origin: Point3<i32>) -> Vector3<i64> {
        let to_fixed = |origin: i32, camera: f64| {
            ((origin as f64 - camera) * CAMERA_PRECISION_UNITY as f64).round() as i64
        };
        Vector3::new(
            to_fixed(chunk_origin.x, self.camera.x),
            to_fixed(chunk_origin.y, self.camera.y),
            to_fixed(chunk_origin.z, self.camera.z),
        )
    }

    /// Project the corners to precise pixel coordinates (not clamped).
    /// Returns `None` if any corner is near-clipped.
    fn project_corners(
        &self,
        chunk_origin: Point3<i32>,
        b: &LocalBox,
    ) -> Option<ArrayVec<Vector2<f32>, 8>> {
        let offset = self.camera_offset(chunk_origin);
        let scale = 1.0 / (1u32 << CAMERA_PRECISION_BITS) as f32;
        let m = self.view_projection;

        let mut out = ArrayVec::new();
        for corner in b.corners_fixed().iter() {
            let p = offset + corner.map(i64::from);
            let clip = m * vec4(p.x as f32 * scale, p.y as f32 * scale, p.z as f32 * scale, 1.0);
            if !(clip.w > self.near_w) {
                return None;
            }
            let inv_w = 1.0 / clip.w;
            let x = clip.x * inv_w * HALF_PRECISE_WIDTH as f32 + HALF_PRECISE_WIDTH as f32;
            let y = clip.y * inv_w * HALF_PRECISE_HEIGHT as f32 + HALF_PRECISE_HEIGHT as f32;
            out.push(vec2(x, y));
        }
        Some(out)
    }

    /// Project a chunk-local box and compute the bounding rectangle of the
    /// result. Use this for visibility queries.
    pub fn project_box(&self, chunk_origin: Point3<i32>, b: &LocalBox) -> Projection {
        let corners = match self.project_corners(chunk_origin, b) {
            Some(x) => x,
            None => return Projection::NearClipped,
        };

        let (mut min, mut max) = (corners[0], corners[0]);
        for p in &corners[1..] {
            min = vec2(min.x.min(p.x), min.y.min(p.y));
            max = vec2(max.x.max(p.x), max.y.max(p.y));
        }

        if max.x < 0.0
            || max.y < 0.0
            || min.x >= PRECISE_WIDTH as f32
            || min.y >= PRECISE_HEIGHT as f32
        {
            return Projection::Outside;
        }

        Projection::Rect(PreciseRect::new(
            clamp_x(min.x.floor()),
            clamp_y(min.y.floor()),
            clamp_x(max.x.ceil()),
            clamp_y(max.y.ceil()),
        ))
    }

    /// Project a chunk-local box and find a rectangle inside its silhouette.
    /// Use this for occluders.
    ///
    /// Returns `None` if the box is near-clipped, or no such rectangle was
    /// found.
    pub fn project_occluder(&self, chunk_origin: Point3<i32>, b: &LocalBox) -> Option<PreciseRect> {
        let corners = self.project_corners(chunk_origin, b)?;
        let hull = convex_hull(&corners)?;
        let [min, max] = inscribed_rect(&hull, INSCRIBE_STEPS)?;

        let rect = [
            clamp_x(min.x.ceil()),
            clamp_y(min.y.ceil()),
            clamp_x(max.x.floor()),
            clamp_y(max.y.floor()),
        ];

        if rect[0] > rect[2] || rect[1] > rect[3] {
            None
        } else {
            Some(PreciseRect::new(rect[0], rect[1], rect[2], rect[3]))
        }
    }
}

fn clamp_x(x: f32) -> i32 {
    x.max(-GUARD_SIZE as f32).min(GUARD_WIDTH as f32) as i32
}

fn clamp_y(y: f32) -> i32 {
    y.max(-GUARD_SIZE as f32).min(GUARD_HEIGHT as f32) as i32
}
