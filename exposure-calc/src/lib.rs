//! Exposure time calculator for ground-based near-infrared imaging
//!
//! Given a target magnitude and a band, this crate estimates the photon rate
//! landing on a detector pixel, the signal-to-noise ratio of a stack of
//! exposures, and the number of exposures needed to reach a target SNR.
//! The default instrument is HAWK-I at the VLT.
//!
//! ```no_run
//! use exposure_calc::units::{AngleExt, Time, TimeExt, Angle};
//! use exposure_calc::ExposureTimeCalculator;
//!
//! let mut etc: ExposureTimeCalculator = ExposureTimeCalculator::default();
//! etc.set_conditions(Angle::from_arcseconds(1.0), 0.5, 1.5)?;
//! let snr = etc.signal_to_noise("H2", 20.0, Time::from_seconds(10.0), 60)?;
//! let ndit = etc.required_ndit("H2", 10.0, 20.0, Time::from_seconds(10.0))?;
//! println!("SNR {snr:.2}, NDIT {ndit}");
//! # Ok::<(), exposure_calc::EtcError>(())
//! ```

pub mod advisory;
pub mod calculator;
pub mod conditions;
pub mod error;
pub mod hardware;
pub mod photometry;
pub mod units;

// Re-exports for easier access
pub use advisory::{Advisory, AdvisoryLog};
pub use calculator::{
    ExposureTimeCalculator, NditEstimate, SearchOutcome, LONG_EXPOSURE_HOURS, MAX_EXPOSURE_HOURS,
};
pub use conditions::ObservingConditions;
pub use error::EtcError;
pub use hardware::{DetectorConfig, InstrumentProfile, TelescopeConfig};
pub use photometry::{
    Band, FlatSpectrumFlux, FluxError, Magnitude, MagnitudeSystem, PhotonFlux, PhotonFluxSource,
};
pub use units::{Electrons, PhotonRate};
