//! Non-fatal advisories raised while computing SNR and exposure counts.
//!
//! Advisories never abort a calculation. Each one is logged at `warn` level
//! and kept in an [`AdvisoryLog`] so library callers can inspect them
//! without scraping log output.

use std::fmt;

use uom::si::f64::Time;

use crate::units::{Electrons, TimeExt};

/// A single advisory record
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    /// Per-DIT signal above the detector linearity limit
    LinearityExceeded { signal: Electrons, limit: Electrons },
    /// Per-DIT signal above saturation; the signal was clamped to `limit`
    SaturationExceeded { signal: Electrons, limit: Electrons },
    /// Cumulative exposure passed the long-exposure threshold
    LongExposure { total: Time },
    /// NDIT search stopped at the exposure cap before reaching the target
    ExposureCapReached { total: Time, ndit: u32 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::LinearityExceeded { signal, limit } => write!(
                f,
                "signal {signal} is above the linearity limit of the detector ({limit})"
            ),
            Advisory::SaturationExceeded { signal, limit } => write!(
                f,
                "signal {signal} is above the saturation limit of the detector ({limit}), clamping"
            ),
            Advisory::LongExposure { total } => write!(
                f,
                "total exposure time {:.2} h is longer than 1 hour",
                total.as_hours()
            ),
            Advisory::ExposureCapReached { total, ndit } => write!(
                f,
                "maximum exposure time reached at NDIT={ndit} ({:.2} h), stopping the search",
                total.as_hours()
            ),
        }
    }
}

/// Ordered collection of advisories raised by a calculator.
///
/// Records accumulate until drained with [`AdvisoryLog::take`].
#[derive(Debug, Clone, Default)]
pub struct AdvisoryLog {
    records: Vec<Advisory>,
}

impl AdvisoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and keep an advisory
    pub fn record(&mut self, advisory: Advisory) {
        log::warn!("{advisory}");
        self.records.push(advisory);
    }

    pub fn records(&self) -> &[Advisory] {
        &self.records
    }

    /// Drain all advisories recorded so far
    pub fn take(&mut self) -> Vec<Advisory> {
        std::mem::take(&mut self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
