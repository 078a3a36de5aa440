//! Type-safe physical units for exposure time calculations
//!
//! SI quantities (time, angle, area, solid angle) come from the `uom` crate
//! and get small extension traits for the units observers actually type.
//! Detector counting quantities that `uom` has no dimension for (photons and
//! electrons per pixel) are newtypes that only implement the arithmetic that
//! keeps them dimensionally consistent.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul};

use uom::si::area::square_meter;
use uom::si::solid_angle::steradian;

pub use uom::si::f64::{Angle, Area, SolidAngle, Time};

/// Steradians in one square arcsecond
const SR_PER_SQ_ARCSEC: f64 = (PI / (180.0 * 3600.0)) * (PI / (180.0 * 3600.0));

/// Extension trait for time conversions used in exposure planning
pub trait TimeExt {
    /// Create a time from seconds
    fn from_seconds(seconds: f64) -> Self;

    /// Get time in seconds
    fn as_seconds(&self) -> f64;

    /// Create a time from hours
    fn from_hours(hours: f64) -> Self;

    /// Get time in hours
    fn as_hours(&self) -> f64;
}

/// Extension trait for angles measured on the sky
pub trait AngleExt {
    /// Create an angle from arcseconds
    fn from_arcseconds(arcsec: f64) -> Self;

    /// Get angle in arcseconds
    fn as_arcseconds(&self) -> f64;
}

/// Extension trait for collecting areas
pub trait AreaExt {
    /// Create an area from square meters
    fn from_square_meters(m2: f64) -> Self;

    /// Get area in square meters
    fn as_square_meters(&self) -> f64;
}

/// Extension trait for pixel footprints on the sky
pub trait SolidAngleExt {
    /// Create a solid angle from square arcseconds
    fn from_square_arcseconds(arcsec2: f64) -> Self;

    /// Get solid angle in square arcseconds
    fn as_square_arcseconds(&self) -> f64;
}

impl TimeExt for Time {
    fn from_seconds(seconds: f64) -> Self {
        Time::new::<uom::si::time::second>(seconds)
    }

    fn as_seconds(&self) -> f64 {
        self.get::<uom::si::time::second>()
    }

    fn from_hours(hours: f64) -> Self {
        Time::new::<uom::si::time::hour>(hours)
    }

    fn as_hours(&self) -> f64 {
        self.get::<uom::si::time::hour>()
    }
}

impl AngleExt for Angle {
    fn from_arcseconds(arcsec: f64) -> Self {
        Angle::new::<uom::si::angle::second>(arcsec)
    }

    fn as_arcseconds(&self) -> f64 {
        self.get::<uom::si::angle::second>()
    }
}

impl AreaExt for Area {
    fn from_square_meters(m2: f64) -> Self {
        Area::new::<square_meter>(m2)
    }

    fn as_square_meters(&self) -> f64 {
        self.get::<square_meter>()
    }
}

impl SolidAngleExt for SolidAngle {
    fn from_square_arcseconds(arcsec2: f64) -> Self {
        SolidAngle::new::<steradian>(arcsec2 * SR_PER_SQ_ARCSEC)
    }

    fn as_square_arcseconds(&self) -> f64 {
        self.get::<steradian>() / SR_PER_SQ_ARCSEC
    }
}

/// Photon arrival rate in ph pixel⁻¹ s⁻¹
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct PhotonRate(f64);

/// Photon count in ph pixel⁻¹
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Photons(f64);

/// Conversion yield of the detector in e⁻ ph⁻¹
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct QuantumYield(f64);

/// Charge in e⁻ pixel⁻¹
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Electrons(f64);

/// Charge accumulation rate in e⁻ pixel⁻¹ s⁻¹
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct ElectronRate(f64);

impl PhotonRate {
    pub fn new(ph_per_pixel_per_s: f64) -> Self {
        Self(ph_per_pixel_per_s)
    }

    /// Numeric value in ph pixel⁻¹ s⁻¹
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Photons {
    pub fn new(ph_per_pixel: f64) -> Self {
        Self(ph_per_pixel)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl QuantumYield {
    pub fn new(e_per_ph: f64) -> Self {
        Self(e_per_ph)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Electrons {
    pub fn new(e_per_pixel: f64) -> Self {
        Self(e_per_pixel)
    }

    /// Numeric value in e⁻ pixel⁻¹
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Poisson noise of this much charge, taken on the numeric e⁻ pixel⁻¹ value
    pub fn shot_noise(&self) -> Electrons {
        Electrons(self.0.sqrt())
    }
}

impl ElectronRate {
    pub fn new(e_per_pixel_per_s: f64) -> Self {
        Self(e_per_pixel_per_s)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Mul<Time> for PhotonRate {
    type Output = Photons;

    fn mul(self, time: Time) -> Photons {
        Photons(self.0 * time.as_seconds())
    }
}

impl Mul<QuantumYield> for Photons {
    type Output = Electrons;

    fn mul(self, qe: QuantumYield) -> Electrons {
        Electrons(self.0 * qe.0)
    }
}

impl Mul<Time> for ElectronRate {
    type Output = Electrons;

    fn mul(self, time: Time) -> Electrons {
        Electrons(self.0 * time.as_seconds())
    }
}

impl Mul<f64> for Electrons {
    type Output = Electrons;

    fn mul(self, factor: f64) -> Electrons {
        Electrons(self.0 * factor)
    }
}

impl Add for Electrons {
    type Output = Electrons;

    fn add(self, rhs: Electrons) -> Electrons {
        Electrons(self.0 + rhs.0)
    }
}

/// Ratio of two charges is dimensionless
impl Div for Electrons {
    type Output = f64;

    fn div(self, rhs: Electrons) -> f64 {
        self.0 / rhs.0
    }
}

impl fmt::Display for PhotonRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} ph/pixel/s", self.0)
    }
}

impl fmt::Display for Electrons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} e-/pixel", self.0)
    }
}
