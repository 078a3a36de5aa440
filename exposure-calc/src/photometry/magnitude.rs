//! Target magnitudes with an explicit photometric system.

use std::fmt;

use super::filters::Band;

/// Photometric zero-point system a magnitude is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MagnitudeSystem {
    Vega,
    AB,
}

/// Brightness of a target.
///
/// A bare number is read as a Vega magnitude; a tagged value states its
/// system. Both convert to AB at the flux-service boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    Plain(f64),
    Tagged { value: f64, system: MagnitudeSystem },
}

impl Magnitude {
    pub fn vega(value: f64) -> Self {
        Magnitude::Tagged {
            value,
            system: MagnitudeSystem::Vega,
        }
    }

    pub fn ab(value: f64) -> Self {
        Magnitude::Tagged {
            value,
            system: MagnitudeSystem::AB,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Magnitude::Plain(value) => *value,
            Magnitude::Tagged { value, .. } => *value,
        }
    }

    /// System the value is expressed in; plain magnitudes are Vega
    pub fn system(&self) -> MagnitudeSystem {
        match self {
            Magnitude::Plain(_) => MagnitudeSystem::Vega,
            Magnitude::Tagged { system, .. } => *system,
        }
    }

    /// AB magnitude of this target in `band`
    pub fn to_ab(&self, band: Band) -> f64 {
        match self.system() {
            MagnitudeSystem::AB => self.value(),
            MagnitudeSystem::Vega => self.value() + band.vega_to_ab(),
        }
    }

    /// Exact-match key: plain and Vega-tagged values of the same bits collide
    pub(crate) fn cache_key(&self) -> (MagnitudeSystem, u64) {
        (self.system(), self.value().to_bits())
    }
}

impl From<f64> for Magnitude {
    fn from(value: f64) -> Self {
        Magnitude::Plain(value)
    }
}

impl From<i32> for Magnitude {
    fn from(value: i32) -> Self {
        Magnitude::Plain(f64::from(value))
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.system() {
            MagnitudeSystem::Vega => write!(f, "{} mag (Vega)", self.value()),
            MagnitudeSystem::AB => write!(f, "{} mag (AB)", self.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plain_is_vega() {
        let mag: Magnitude = 20.0.into();
        assert_eq!(mag.system(), MagnitudeSystem::Vega);
        assert_eq!(mag.value(), 20.0);
        assert_eq!(mag.cache_key(), Magnitude::vega(20.0).cache_key());
        assert_ne!(mag.cache_key(), Magnitude::ab(20.0).cache_key());
    }

    #[test]
    fn test_ab_conversion() {
        assert_relative_eq!(Magnitude::ab(18.0).to_ab(Band::J), 18.0);
        assert_relative_eq!(Magnitude::from(18.0).to_ab(Band::J), 18.91, epsilon = 1e-12);
        assert_relative_eq!(Magnitude::vega(0.0).to_ab(Band::Ks), 1.85, epsilon = 1e-12);
    }

    #[test]
    fn test_integer_magnitudes() {
        assert_eq!(Magnitude::from(-10), Magnitude::Plain(-10.0));
    }

    #[test]
    fn test_cache_key_is_exact() {
        let a = Magnitude::from(20.0);
        let b = Magnitude::from(20.0 + 1e-12);
        assert_ne!(a.cache_key(), b.cache_key());
    }
}
