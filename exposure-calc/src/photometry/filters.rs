//! HAWK-I near-infrared filter set.
//!
//! Each band carries its passband edges (from the central wavelength and
//! FWHM listed in the instrument manual) and the offset between Vega and AB
//! magnitudes in that band, which is what the built-in flux model needs to
//! turn a catalog magnitude into a photon count.
//!
//! # Broad bands
//! - **Y, J, H, Ks**: standard near-IR broad bands
//!
//! # Narrow bands
//! - **CH4**: methane absorption
//! - **H2**: molecular hydrogen 1-0 S(1) line
//! - **BrGamma**: Brackett γ line
//! - **NB1060, NB1190, NB2090**: cosmology / continuum narrow bands

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EtcError;

/// A named wavelength filter of the instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    Ks,
    Y,
    J,
    H,
    #[serde(rename = "CH4")]
    Ch4,
    H2,
    #[serde(rename = "NB1060")]
    Nb1060,
    #[serde(rename = "NB1190")]
    Nb1190,
    #[serde(rename = "NB2090")]
    Nb2090,
    BrGamma,
}

impl Band {
    /// Every band the filter wheel carries, in wheel order
    pub const ALL: [Band; 10] = [
        Band::Ks,
        Band::Y,
        Band::J,
        Band::H,
        Band::Ch4,
        Band::H2,
        Band::Nb1060,
        Band::Nb1190,
        Band::Nb2090,
        Band::BrGamma,
    ];

    /// Identifier as used on the command line and in profile files
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Ks => "Ks",
            Band::Y => "Y",
            Band::J => "J",
            Band::H => "H",
            Band::Ch4 => "CH4",
            Band::H2 => "H2",
            Band::Nb1060 => "NB1060",
            Band::Nb1190 => "NB1190",
            Band::Nb2090 => "NB2090",
            Band::BrGamma => "BrGamma",
        }
    }

    /// Central wavelength and FWHM in microns
    fn center_and_width_um(&self) -> (f64, f64) {
        match self {
            Band::Y => (1.021, 0.180),
            Band::J => (1.258, 0.154),
            Band::H => (1.620, 0.251),
            Band::Ks => (2.146, 0.324),
            Band::Ch4 => (1.575, 0.112),
            Band::H2 => (2.124, 0.030),
            Band::Nb1060 => (1.061, 0.010),
            Band::Nb1190 => (1.186, 0.010),
            Band::Nb2090 => (2.095, 0.020),
            Band::BrGamma => (2.165, 0.030),
        }
    }

    /// Central wavelength in microns
    pub fn center_um(&self) -> f64 {
        self.center_and_width_um().0
    }

    /// Passband edges `(lower, upper)` in microns
    pub fn passband_um(&self) -> (f64, f64) {
        let (center, width) = self.center_and_width_um();
        (center - width / 2.0, center + width / 2.0)
    }

    /// m_AB - m_Vega for a source observed through this band
    pub fn vega_to_ab(&self) -> f64 {
        match self {
            Band::Y => 0.634,
            Band::J => 0.91,
            Band::H => 1.39,
            Band::Ks => 1.85,
            Band::Ch4 => 1.33,
            Band::H2 => 1.83,
            Band::Nb1060 => 0.68,
            Band::Nb1190 => 0.83,
            Band::Nb2090 => 1.80,
            Band::BrGamma => 1.86,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = EtcError;

    /// Exact, case-sensitive match on the band identifier
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Band::ALL
            .iter()
            .copied()
            .find(|band| band.as_str() == s)
            .ok_or_else(|| EtcError::InvalidBand {
                band: s.to_string(),
                valid: Band::ALL.to_vec(),
            })
    }
}

/// Render a band list as `Ks, Y, J` for messages
pub fn format_bands(bands: &[Band]) -> String {
    bands
        .iter()
        .map(Band::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
