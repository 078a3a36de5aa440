//! Detector configuration for exposure time calculations

use serde::{Deserialize, Serialize};
use uom::si::f64::SolidAngle;

use crate::error::EtcError;
use crate::units::{ElectronRate, Electrons, QuantumYield, SolidAngleExt};

/// Configuration for an imaging detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Name/model of the detector
    pub name: String,
    /// Read noise in electrons per pixel per DIT
    pub read_noise_e: f64,
    /// Dark current in electrons per pixel per second
    pub dark_current_e_p_s: f64,
    /// Photon to electron conversion efficiency (e⁻/ph), flat across bands
    pub quantum_efficiency: f64,
    /// Pixel scale in arcseconds per pixel side
    pub pixel_scale_arcsec: f64,
    /// Signal in electrons per pixel above which response is non-linear
    pub linearity_limit_e: f64,
    /// Full well in electrons per pixel
    pub saturation_limit_e: f64,
}

impl DetectorConfig {
    /// Create a new detector configuration
    pub fn new(
        name: impl Into<String>,
        read_noise_e: f64,
        dark_current_e_p_s: f64,
        quantum_efficiency: f64,
        pixel_scale_arcsec: f64,
        linearity_limit_e: f64,
        saturation_limit_e: f64,
    ) -> Self {
        Self {
            name: name.into(),
            read_noise_e,
            dark_current_e_p_s,
            quantum_efficiency,
            pixel_scale_arcsec,
            linearity_limit_e,
            saturation_limit_e,
        }
    }

    /// Check the physical constraints between fields
    pub fn validate(&self) -> Result<(), EtcError> {
        let non_negative = [
            ("read_noise_e", self.read_noise_e),
            ("dark_current_e_p_s", self.dark_current_e_p_s),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EtcError::InvalidArgument(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        let positive = [
            ("pixel_scale_arcsec", self.pixel_scale_arcsec),
            ("linearity_limit_e", self.linearity_limit_e),
            ("saturation_limit_e", self.saturation_limit_e),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EtcError::InvalidArgument(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }

        if !(self.quantum_efficiency > 0.0 && self.quantum_efficiency <= 1.0) {
            return Err(EtcError::OutOfRange {
                name: "quantum_efficiency",
                value: self.quantum_efficiency,
                min: 0.0,
                max: 1.0,
            });
        }

        if self.linearity_limit_e > self.saturation_limit_e {
            return Err(EtcError::InvalidArgument(format!(
                "linearity limit {} e- exceeds saturation limit {} e-",
                self.linearity_limit_e, self.saturation_limit_e
            )));
        }

        Ok(())
    }

    pub fn read_noise(&self) -> Electrons {
        Electrons::new(self.read_noise_e)
    }

    pub fn dark_current(&self) -> ElectronRate {
        ElectronRate::new(self.dark_current_e_p_s)
    }

    pub fn quantum_yield(&self) -> QuantumYield {
        QuantumYield::new(self.quantum_efficiency)
    }

    /// Sky footprint of one square pixel
    pub fn pixel_footprint(&self) -> SolidAngle {
        SolidAngle::from_square_arcseconds(self.pixel_scale_arcsec.powi(2))
    }

    pub fn linearity_limit(&self) -> Electrons {
        Electrons::new(self.linearity_limit_e)
    }

    pub fn saturation_limit(&self) -> Electrons {
        Electrons::new(self.saturation_limit_e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hawaii2rg() -> DetectorConfig {
        DetectorConfig::new("HAWAII-2RG", 5.0, 0.01, 0.8, 0.1063, 100_000.0, 120_000.0)
    }

    #[test]
    fn test_typed_accessors() {
        let detector = hawaii2rg();
        assert_eq!(detector.read_noise(), Electrons::new(5.0));
        assert_eq!(detector.dark_current(), ElectronRate::new(0.01));
        assert_eq!(detector.quantum_yield(), QuantumYield::new(0.8));
        assert_relative_eq!(
            detector.pixel_footprint().as_square_arcseconds(),
            0.1063 * 0.1063,
            max_relative = 1e-12
        );
        assert!(detector.linearity_limit() < detector.saturation_limit());
    }

    #[test]
    fn test_validate_accepts_hawaii2rg() {
        assert!(hawaii2rg().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_limits() {
        let mut detector = hawaii2rg();
        detector.linearity_limit_e = 130_000.0;
        assert!(matches!(
            detector.validate(),
            Err(EtcError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_qe() {
        for qe in [0.0, -0.2, 1.5, f64::NAN] {
            let mut detector = hawaii2rg();
            detector.quantum_efficiency = qe;
            assert!(
                matches!(detector.validate(), Err(EtcError::OutOfRange { .. })),
                "qe {qe} accepted"
            );
        }
    }

    #[test]
    fn test_validate_rejects_negative_noise() {
        let mut detector = hawaii2rg();
        detector.read_noise_e = -1.0;
        assert!(detector.validate().is_err());

        let mut detector = hawaii2rg();
        detector.pixel_scale_arcsec = 0.0;
        assert!(detector.validate().is_err());
    }
}
