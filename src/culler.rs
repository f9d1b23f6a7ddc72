//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
//! The per-frame occlusion culling pipeline.
use cgmath::{Matrix4, Point3};

use crate::{
    config::{ConfigError, CullerConfig},
    project::{LocalBox, Projection, Projector},
    raster::{CoverageRaster, PreciseRect},
};

/// The visibility of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The box may be visible and must be rendered.
    Visible,
    /// The box is hidden behind the occluders drawn so far.
    Occluded,
    /// The box is outside the viewport.
    Outside,
}

impl Visibility {
    /// `true` unless the box can be skipped.
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

/// The statistics of one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CullStats {
    pub tested: u32,
    pub occluded: u32,
    pub outside: u32,
    pub occluders_drawn: u32,
    pub occluders_rejected: u32,
}

/// Decides the visibility of chunks against the occluders drawn so far in
/// the current frame.
///
/// The host is expected to visit chunks roughly front to back, calling
/// [`test_box`](Self::test_box) for each chunk and then
/// [`add_occluders`](Self::add_occluders) for each chunk that was found to be
/// visible.
#[derive(Debug)]
pub struct OcclusionCuller {
    config: CullerConfig,
    projector: Projector,
    raster: CoverageRaster,
    stats: CullStats,
}

impl OcclusionCuller {
    pub fn new(config: CullerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            projector: Projector::new(config.near_w),
            raster: CoverageRaster::new(),
            stats: CullStats::default(),
            config,
        })
    }

    pub fn config(&self) -> &CullerConfig {
        &self.config
    }

    pub fn raster(&self) -> &CoverageRaster {
        &self.raster
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Start a new frame. This clears the coverage raster.
    ///
    /// `view_projection` must map coordinates relative to `camera` to the
    /// clip space.
    pub fn begin_frame(&mut self, view_projection: Matrix4<f32>, camera: Point3<f64>) {
        self.projector.set_camera(view_projection, camera);
        self.raster.clear();
        self.stats = CullStats::default();
    }

    /// Determine the visibility of a chunk-local box.
    pub fn test_box(&mut self, chunk_origin: Point3<i32>, b: &LocalBox) -> Visibility {
        if !self.config.enabled {
            return Visibility::Visible;
        }

        self.stats.tested += 1;

        let rect = match self.projector.project_box(chunk_origin, b) {
            Projection::Outside => {
                self.stats.outside += 1;
                return Visibility::Outside;
            }
            Projection::NearClipped => return Visibility::Visible,
            Projection::Rect(rect) => rect,
        };

        let visibility = self.test_rect(&rect);
        match visibility {
            Visibility::Occluded => self.stats.occluded += 1,
            Visibility::Outside => self.stats.outside += 1,
            Visibility::Visible => {}
        }
        visibility
    }

    /// Determine the visibility of a precise rectangle.
    pub fn test_rect(&self, rect: &PreciseRect) -> Visibility {
        match rect.outer_pixels() {
            None => Visibility::Outside,
            Some(pixels) if self.raster.is_covered(&pixels) => Visibility::Occluded,
            Some(_) => Visibility::Visible,
        }
    }

    /// Draw the occluders of a chunk.
    pub fn add_occluders(&mut self, chunk_origin: Point3<i32>, boxes: &[LocalBox]) {
        if !self.config.enabled {
            return;
        }

        for b in boxes {
            match self.projector.project_occluder(chunk_origin, b) {
                Some(rect) if self.add_occluder_rect(&rect) => {
                    self.stats.occluders_drawn += 1;
                }
                _ => {
                    self.stats.occluders_rejected += 1;
                }
            }
        }
    }

    /// Draw a precise rectangle as an occluder. Returns `false` if it was
    /// rejected for covering too few pixels.
    pub fn add_occluder_rect(&mut self, rect: &PreciseRect) -> bool {
        match rect.inner_pixels() {
            Some(pixels) if pixels.area() >= self.config.min_occluder_pixels => {
                self.raster.fill(&pixels);
                true
            }
            _ => false,
        }
    }

    /// Finish the frame and return its statistics.
    pub fn end_frame(&mut self) -> CullStats {
        let stats = self.stats;
        log::trace!("occlusion stats: {:?}", stats);

        if self.config.debug_raster_output && log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "coverage raster ({} pixels covered):\n{}",
                self.raster.covered_pixels(),
                self.raster.format_low_level()
            );
            log::trace!("full mid tiles:\n{}", self.raster.format_top_level());
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PRECISE_HEIGHT, PRECISE_WIDTH};

    #[test]
    fn occluder_rect_hides_rect_behind() {
        let mut culler = OcclusionCuller::new(CullerConfig::default()).unwrap();
        culler.begin_frame(Matrix4::from_scale(1.0), Point3::new(0.0, 0.0, 0.0));

        let query = PreciseRect::new(1000, 1000, 2000, 1500);
        assert_eq!(culler.test_rect(&query), Visibility::Visible);

        assert!(culler.add_occluder_rect(&PreciseRect::new(0, 0, 4000, 4000)));
        assert_eq!(culler.test_rect(&query), Visibility::Occluded);
        assert_eq!(
            culler.test_rect(&PreciseRect::new(3000, 3000, 5000, 3500)),
            Visibility::Visible
        );
        assert_eq!(
            culler.test_rect(&PreciseRect::new(
                PRECISE_WIDTH,
                PRECISE_HEIGHT,
                PRECISE_WIDTH + 10,
                PRECISE_HEIGHT + 10
            )),
            Visibility::Outside
        );
    }

    #[test]
    fn last_column_and_row_are_not_outside() {
        let mut culler = OcclusionCuller::new(CullerConfig::default()).unwrap();
        culler.begin_frame(Matrix4::from_scale(1.0), Point3::new(0.0, 0.0, 0.0));

        let column = PreciseRect::new(PRECISE_WIDTH - 6, 100, PRECISE_WIDTH - 2, 200);
        let row = PreciseRect::new(100, PRECISE_HEIGHT - 6, 200, PRECISE_HEIGHT - 2);
        assert_eq!(culler.test_rect(&column), Visibility::Visible);
        assert_eq!(culler.test_rect(&row), Visibility::Visible);

        // Cover the bottom-right corner
        assert!(culler.add_occluder_rect(&PreciseRect::new(
            0,
            0,
            PRECISE_WIDTH + 100,
            PRECISE_HEIGHT + 100
        )));
        assert_eq!(culler.test_rect(&column), Visibility::Occluded);
        assert_eq!(culler.test_rect(&row), Visibility::Occluded);
    }

    #[test]
    fn outside_rect_is_counted() {
        let mut culler = OcclusionCuller::new(CullerConfig::default()).unwrap();
        // Every point of the box lands at the clip-space `(x, y) = (2, 2)`
        let m = Matrix4::from_translation(cgmath::vec3(2.0, 2.0, 0.0))
            * Matrix4::from_nonuniform_scale(0.0, 0.0, 1.0);
        culler.begin_frame(m, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(
            culler.test_box(Point3::new(0, 0, 0), &LocalBox::FULL),
            Visibility::Outside
        );
        assert_eq!(culler.end_frame().outside, 1);
    }

    #[test]
    fn small_occluders_are_rejected() {
        let mut culler = OcclusionCuller::new(CullerConfig {
            min_occluder_pixels: 10,
            ..CullerConfig::default()
        })
        .unwrap();
        // 3×3 pixels
        assert!(!culler.add_occluder_rect(&PreciseRect::new(0, 0, 47, 47)));
        assert_eq!(culler.raster().covered_pixels(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = OcclusionCuller::new(CullerConfig {
            near_w: -1.0,
            ..CullerConfig::default()
        });
        assert_eq!(result.unwrap_err(), ConfigError::InvalidNearW(-1.0));
    }
}
