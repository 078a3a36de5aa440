//! Telescope light-collecting configuration.
//!
//! Only the clear aperture matters for exposure time estimates: it sets
//! the collecting area that scales the target's photon flux density.
//!
//! # Light Collection
//! - **Collecting area**: A = π(D/2)²

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use uom::si::f64::Area;

use crate::units::AreaExt;

/// Telescope primary mirror configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelescopeConfig {
    /// Telescope name or identifier
    pub name: String,
    /// Primary mirror diameter in meters
    pub aperture_m: f64,
}

impl TelescopeConfig {
    /// Create a new telescope configuration
    pub fn new(name: impl Into<String>, aperture_m: f64) -> Self {
        Self {
            name: name.into(),
            aperture_m,
        }
    }

    /// Calculate the collecting area in square meters
    pub fn collecting_area_m2(&self) -> f64 {
        PI * (self.aperture_m / 2.0).powi(2)
    }

    /// Collecting area as a typed quantity
    pub fn collecting_area(&self) -> Area {
        Area::from_square_meters(self.collecting_area_m2())
    }
}
