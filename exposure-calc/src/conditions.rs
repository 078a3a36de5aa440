//! Observing conditions for a night.
//!
//! Seeing, airmass and moon illumination are recorded on the calculator but
//! the noise model does not read them yet; sky background is the planned
//! consumer.

use uom::si::f64::Angle;

use crate::error::EtcError;
use crate::units::AngleExt;

/// Atmospheric and lunar conditions during the observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservingConditions {
    seeing: Angle,
    moon_illumination: f64,
    airmass: f64,
}

impl ObservingConditions {
    /// Create validated conditions.
    ///
    /// # Arguments
    ///
    /// * `seeing` - Seeing FWHM
    /// * `moon_illumination` - Illuminated fraction of the moon (0 to 1)
    /// * `airmass` - Airmass of the observation; not range-checked
    ///
    /// # Errors
    ///
    /// [`EtcError::OutOfRange`] if `moon_illumination` is outside [0, 1].
    pub fn new(seeing: Angle, moon_illumination: f64, airmass: f64) -> Result<Self, EtcError> {
        if !(0.0..=1.0).contains(&moon_illumination) {
            return Err(EtcError::OutOfRange {
                name: "moon_illumination",
                value: moon_illumination,
                min: 0.0,
                max: 1.0,
            });
        }

        Ok(Self {
            seeing,
            moon_illumination,
            airmass,
        })
    }

    pub fn seeing(&self) -> Angle {
        self.seeing
    }

    pub fn moon_illumination(&self) -> f64 {
        self.moon_illumination
    }

    pub fn airmass(&self) -> f64 {
        self.airmass
    }
}

impl Default for ObservingConditions {
    fn default() -> Self {
        Self {
            seeing: Angle::from_arcseconds(1.0),
            moon_illumination: 0.5,
            airmass: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let conditions = ObservingConditions::default();
        assert_relative_eq!(conditions.seeing().as_arcseconds(), 1.0, epsilon = 1e-12);
        assert_eq!(conditions.moon_illumination(), 0.5);
        assert_eq!(conditions.airmass(), 1.0);
    }

    #[test]
    fn test_moon_illumination_bounds_inclusive() {
        for moon in [0.0, 0.5, 1.0] {
            assert!(ObservingConditions::new(Angle::from_arcseconds(0.8), moon, 1.2).is_ok());
        }
    }

    #[test]
    fn test_moon_illumination_out_of_range() {
        for moon in [-0.01, 1.01, 2.0, f64::NAN, f64::INFINITY] {
            let result = ObservingConditions::new(Angle::from_arcseconds(1.0), moon, 1.0);
            assert!(
                matches!(result, Err(EtcError::OutOfRange { name: "moon_illumination", .. })),
                "moon {moon} accepted"
            );
        }
    }

    #[test]
    fn test_airmass_not_validated() {
        // Unphysical airmass values are stored as given
        let conditions = ObservingConditions::new(Angle::from_arcseconds(1.0), 0.5, 0.5).unwrap();
        assert_eq!(conditions.airmass(), 0.5);
    }
}
