//! Photon flux of a target in a band.
//!
//! The calculator treats flux as coming from an external photometric service
//! behind [`PhotonFluxSource`]. It asks for a band, a magnitude and the
//! instrument/observatory names, and gets back a photon flux density in
//! ph s⁻¹ m⁻² arcsec⁻². The magnitude is read per square arcsecond, so the
//! calculator can scale by collecting area and pixel footprint to get a
//! per-pixel rate.
//!
//! [`FlatSpectrumFlux`] is the built-in service. It models the target as flat
//! in F_ν, which makes the band-integrated photon count closed-form:
//!
//! ```text
//! N = ∫ F_ν / (h ν) dν = (F_ν / h) · ln(λ_hi / λ_lo)
//! ```

use thiserror::Error;
use uom::si::f64::{Area, SolidAngle};

use super::filters::Band;
use super::magnitude::Magnitude;
use crate::units::{AreaExt, PhotonRate, SolidAngleExt};

/// Physical constants in CGS units
pub struct CGS {}

impl CGS {
    /// AB magnitude system zero-point flux density
    /// Units: 3631e-23 erg s⁻¹ cm⁻² Hz⁻¹
    pub const AB_ZERO_POINT_FLUX_DENSITY: f64 = 3631e-23;

    /// Planck's constant
    /// Units: erg s
    pub const PLANCK_CONSTANT: f64 = 6.62607015e-27;
}

const CM2_PER_M2: f64 = 1.0e4;

/// Errors raised by a flux service
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FluxError {
    #[error("magnitude must be finite, got {0}")]
    NonFiniteMagnitude(f64),

    #[error("flux service has no data for band {band} on {instrument}@{observatory}")]
    NoData {
        band: Band,
        instrument: String,
        observatory: String,
    },

    #[error("flux service returned a non-positive flux ({0}) ph/s/m2/arcsec2")]
    NonPositive(f64),
}

/// Photon flux density in ph s⁻¹ m⁻² arcsec⁻²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PhotonFlux(f64);

impl PhotonFlux {
    pub fn new(ph_per_s_per_m2_per_arcsec2: f64) -> Self {
        Self(ph_per_s_per_m2_per_arcsec2)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Rate landing on one pixel of a telescope with the given collecting area
    pub fn per_pixel(&self, collecting_area: Area, pixel_footprint: SolidAngle) -> PhotonRate {
        PhotonRate::new(
            self.0 * collecting_area.as_square_meters() * pixel_footprint.as_square_arcseconds(),
        )
    }
}

/// Source of photon fluxes for a (band, magnitude) pair
pub trait PhotonFluxSource {
    fn photon_flux(
        &self,
        band: Band,
        magnitude: Magnitude,
        instrument: &str,
        observatory: &str,
    ) -> Result<PhotonFlux, FluxError>;
}

/// Flat-F_ν spectrum integrated over the band's top-hat passband
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatSpectrumFlux;

impl FlatSpectrumFlux {
    /// Spectral flux density in erg s⁻¹ cm⁻² Hz⁻¹ for an AB magnitude
    pub fn spectral_flux_density(ab_mag: f64) -> f64 {
        // F_ν = F_ν,0 * 10^(-0.4 * AB)
        CGS::AB_ZERO_POINT_FLUX_DENSITY * 10f64.powf(-0.4 * ab_mag)
    }
}

impl PhotonFluxSource for FlatSpectrumFlux {
    fn photon_flux(
        &self,
        band: Band,
        magnitude: Magnitude,
        _instrument: &str,
        _observatory: &str,
    ) -> Result<PhotonFlux, FluxError> {
        if !magnitude.value().is_finite() {
            return Err(FluxError::NonFiniteMagnitude(magnitude.value()));
        }

        let f_nu = Self::spectral_flux_density(magnitude.to_ab(band));
        let (lower_um, upper_um) = band.passband_um();

        // Photons s⁻¹ cm⁻², then per m²
        let photons_cgs = f_nu / CGS::PLANCK_CONSTANT * (upper_um / lower_um).ln();
        let flux = photons_cgs * CM2_PER_M2;

        // Underflows to zero for absurdly faint targets
        if !(flux > 0.0) {
            return Err(FluxError::NonPositive(flux));
        }
        Ok(PhotonFlux::new(flux))
    }
}
