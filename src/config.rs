//
// Copyright 2019 yvt, all rights reserved.
//
// This source code is a part of Nightingales.
//
use std::{error::Error, fmt};

/// The options of `OcclusionCuller`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CullerConfig {
    /// If `false`, every box is reported visible and occluders are ignored.
    pub enabled: bool,

    /// Log the coverage raster at the end of every frame (at the `debug`
    /// level).
    pub debug_raster_output: bool,

    /// Occluders whose inner pixel rectangle has fewer pixels than this are
    /// discarded.
    pub min_occluder_pixels: u32,

    /// A projected point is considered near-clipped if its clip space W
    /// coordinate is not greater than this value.
    pub near_w: f32,
}

impl Default for CullerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug_raster_output: false,
            min_occluder_pixels: 4,
            near_w: 1.0e-3,
        }
    }
}

/// An error returned by `CullerConfig::validate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `near_w` is not a positive finite number.
    InvalidNearW(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::InvalidNearW(x) => {
                write!(f, "near_w must be a positive finite number (got {})", x)
            }
        }
    }
}

impl Error for ConfigError {}

impl CullerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.near_w.is_finite() && self.near_w > 0.0) {
            return Err(ConfigError::InvalidNearW(self.near_w));
        }
        Ok(())
    }
}
