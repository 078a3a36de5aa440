//! Instrument profiles: telescope, detector and filter set under one name.
//!
//! A profile is immutable once built and is handed to the calculator by
//! value. Profiles round-trip through JSON so sites can keep their own
//! instrument definitions next to the predefined [`models`].

use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::detector::DetectorConfig;
use super::telescope::TelescopeConfig;
use crate::error::EtcError;
use crate::photometry::Band;

/// Everything the calculator needs to know about the hardware
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentProfile {
    /// Instrument name passed to the flux service
    pub name: String,
    /// Observatory name passed to the flux service
    pub observatory: String,
    /// Bands the instrument can observe in
    pub bands: Vec<Band>,
    pub telescope: TelescopeConfig,
    pub detector: DetectorConfig,
}

impl InstrumentProfile {
    /// Build a validated profile
    pub fn new(
        name: impl Into<String>,
        observatory: impl Into<String>,
        bands: Vec<Band>,
        telescope: TelescopeConfig,
        detector: DetectorConfig,
    ) -> Result<Self, EtcError> {
        let profile = Self {
            name: name.into(),
            observatory: observatory.into(),
            bands,
            telescope,
            detector,
        };
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> Result<(), EtcError> {
        if self.bands.is_empty() {
            return Err(EtcError::InvalidArgument(format!(
                "instrument {} has no bands",
                self.name
            )));
        }
        if !(self.telescope.aperture_m.is_finite() && self.telescope.aperture_m > 0.0) {
            return Err(EtcError::InvalidArgument(format!(
                "telescope aperture must be positive, got {} m",
                self.telescope.aperture_m
            )));
        }
        self.detector.validate()
    }

    /// Resolve a band identifier against this instrument's filter set
    pub fn band(&self, identifier: &str) -> Result<Band, EtcError> {
        let invalid = || EtcError::InvalidBand {
            band: identifier.to_string(),
            valid: self.bands.clone(),
        };
        let band: Band = identifier.parse().map_err(|_| invalid())?;
        if self.bands.contains(&band) {
            Ok(band)
        } else {
            Err(invalid())
        }
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), EtcError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file, validating the contents
    pub fn load_from_file(path: &Path) -> Result<Self, EtcError> {
        let json = std::fs::read_to_string(path)?;
        let profile: InstrumentProfile = serde_json::from_str(&json)?;
        profile.validate()?;
        Ok(profile)
    }
}

/// Standard instrument models
pub mod models {
    use super::*;

    /// HAWK-I on UT4 at Paranal.
    ///
    /// Four HAWAII-2RG 2048x2048 detectors, 7.5'x7.5' field at 0.106"/pixel.
    /// NB0984 is left out of the band list.
    pub static HAWKI: Lazy<InstrumentProfile> = Lazy::new(|| InstrumentProfile {
        name: "HAWKI".to_string(),
        observatory: "Paranal".to_string(),
        bands: Band::ALL.to_vec(),
        telescope: TelescopeConfig::new("VLT UT4", 8.0),
        detector: DetectorConfig::new(
            "HAWAII-2RG",
            5.0,   // e-/pixel/DIT
            0.01,  // e-/pixel/s
            0.8,   // e-/ph
            0.1063,
            100_000.0,
            120_000.0,
        ),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hawki_model_is_valid() {
        let hawki = models::HAWKI.clone();
        assert!(hawki.validate().is_ok());
        assert_eq!(hawki.name, "HAWKI");
        assert_eq!(hawki.observatory, "Paranal");
        assert_eq!(hawki.bands.len(), 10);
        assert_eq!(hawki.telescope.aperture_m, 8.0);
        assert_eq!(hawki.detector.saturation_limit_e, 120_000.0);
    }

    #[test]
    fn test_band_lookup() {
        let hawki = models::HAWKI.clone();
        assert_eq!(hawki.band("H2").unwrap(), Band::H2);
        assert!(matches!(
            hawki.band("A"),
            Err(EtcError::InvalidBand { ref band, .. }) if band == "A"
        ));
    }

    #[test]
    fn test_band_lookup_respects_profile_subset() {
        let mut broad_only = models::HAWKI.clone();
        broad_only.bands = vec![Band::Y, Band::J, Band::H, Band::Ks];

        assert!(broad_only.band("J").is_ok());
        match broad_only.band("H2") {
            Err(EtcError::InvalidBand { band, valid }) => {
                assert_eq!(band, "H2");
                assert_eq!(valid, vec![Band::Y, Band::J, Band::H, Band::Ks]);
            }
            other => panic!("expected InvalidBand, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_empty_band_list() {
        let hawki = models::HAWKI.clone();
        let result = InstrumentProfile::new(
            "Empty",
            "Nowhere",
            vec![],
            hawki.telescope,
            hawki.detector,
        );
        assert!(matches!(result, Err(EtcError::InvalidArgument(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hawki.json");

        models::HAWKI.save_to_file(&path).unwrap();
        let loaded = InstrumentProfile::load_from_file(&path).unwrap();
        assert_eq!(loaded, *models::HAWKI);
    }

    #[test]
    fn test_load_rejects_invalid_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");

        let mut broken = models::HAWKI.clone();
        broken.detector.saturation_limit_e = 50_000.0;
        broken.save_to_file(&path).unwrap();
        assert!(InstrumentProfile::load_from_file(&path).is_err());

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            InstrumentProfile::load_from_file(&path),
            Err(EtcError::Parse(_))
        ));
    }
}
