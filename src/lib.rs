//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
//! # Tenebra
//!
//! Hierarchical occlusion culling for voxel terrain on the CPU
//!
//! Tenebra maintains a binary coverage raster of `1024 × 512` pixels
//! organized as a three-level tile pyramid. Chunks are visited roughly front
//! to back; each chunk's bounding box is tested against the raster, and the
//! occluder boxes of every chunk found visible are drawn into it.
//!
//! Occluders are derived from the solid blocks of each 16×16 slice of a
//! chunk. A slice is represented as a 256-bit [`AreaSample`] and decomposed
//! into rectangles ([`Area`]) by a greedy search over the table of every
//! possible rectangle.
//!
//! # Conservativeness
//!
//! A visibility query covers every pixel touched by the bounding rectangle of
//! a projected box. An occluder only covers the pixels whose centers are
//! inside a rectangle inscribed in the silhouette of a projected box. Hence a
//! box is never reported occluded unless it is hidden by occluders drawn
//! before it. Boxes crossing the near plane are always visible.
//!
//! # Threading
//!
//! None of the types here use interior mutability. Culling independent views
//! in parallel requires one `OcclusionCuller` per view.
pub mod area;
pub mod consts;
mod config;
mod culler;
pub mod debug;
mod project;
pub mod raster;
mod region;

pub use crate::{
    area::{Area, AreaKey, AreaSample},
    config::{ConfigError, CullerConfig},
    culler::{CullStats, OcclusionCuller, Visibility},
    debug::{LogPrinter, NoPrint, ShapePrinter, StringPrinter},
    project::{LocalBox, Projection, Projector},
    raster::{CoverageRaster, PixelRect, PreciseRect},
    region::{sample_slice, Axis, OccluderBuilder},
};

mod utils {
    pub mod geom;
}
