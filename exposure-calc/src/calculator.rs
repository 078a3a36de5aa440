//! Exposure time calculator for a single imaging instrument.
//!
//! # Noise Model
//!
//! For a per-exposure integration time DIT repeated NDIT times:
//!
//! ```text
//! S_dit  = rate · DIT · QE                 (clamped at saturation)
//! S      = S_dit · NDIT
//! N      = RN · NDIT + DC · DIT · NDIT + √S
//! SNR    = S / N
//! ```
//!
//! The noise terms are summed linearly, not in quadrature. Sky background
//! is not modelled yet.
//!
//! # Exposure Search
//!
//! [`ExposureTimeCalculator::estimate_ndit`] walks NDIT = 1, 2, 3, … until the
//! target SNR is met. Past one hour of cumulative exposure it warns once;
//! at three hours it gives up and reports the NDIT it stopped at.

use std::collections::HashMap;

use uom::si::f64::{Angle, Time};

use crate::advisory::{Advisory, AdvisoryLog};
use crate::conditions::ObservingConditions;
use crate::error::EtcError;
use crate::hardware::{models, InstrumentProfile};
use crate::photometry::{Band, FlatSpectrumFlux, Magnitude, MagnitudeSystem, PhotonFluxSource};
use crate::units::{Electrons, PhotonRate, TimeExt};

/// Cumulative exposure that triggers the long-exposure advisory
pub const LONG_EXPOSURE_HOURS: f64 = 1.0;

/// Cumulative exposure at which the NDIT search stops
pub const MAX_EXPOSURE_HOURS: f64 = 3.0;

type RateKey = (Band, MagnitudeSystem, u64);

/// How an NDIT search ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The returned NDIT meets the target SNR
    TargetReached,
    /// The search hit the exposure cap; the target may not be met
    TimeCapReached,
}

/// Result of an NDIT search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NditEstimate {
    /// Number of exposures
    pub ndit: u32,
    /// SNR achieved with `ndit` exposures
    pub snr: f64,
    /// Cumulative exposure time `ndit · dit`
    pub total_time: Time,
    pub outcome: SearchOutcome,
}

impl NditEstimate {
    pub fn reached_target(&self) -> bool {
        self.outcome == SearchOutcome::TargetReached
    }
}

/// Exposure time calculator bound to one instrument.
///
/// Photon rates are memoised per exact (band, magnitude) pair. The cache
/// never evicts; it grows with the number of distinct targets queried.
#[derive(Debug)]
pub struct ExposureTimeCalculator<S: PhotonFluxSource = FlatSpectrumFlux> {
    instrument: InstrumentProfile,
    flux_source: S,
    conditions: ObservingConditions,
    rate_cache: HashMap<RateKey, PhotonRate>,
    advisories: AdvisoryLog,
}

impl ExposureTimeCalculator<FlatSpectrumFlux> {
    /// Calculator using the built-in flat-spectrum flux model
    pub fn new(instrument: InstrumentProfile) -> Self {
        Self::with_flux_source(instrument, FlatSpectrumFlux)
    }
}

impl Default for ExposureTimeCalculator<FlatSpectrumFlux> {
    fn default() -> Self {
        Self::new(models::HAWKI.clone())
    }
}

impl<S: PhotonFluxSource> ExposureTimeCalculator<S> {
    /// Calculator using a caller-supplied flux service
    pub fn with_flux_source(instrument: InstrumentProfile, flux_source: S) -> Self {
        Self {
            instrument,
            flux_source,
            conditions: ObservingConditions::default(),
            rate_cache: HashMap::new(),
            advisories: AdvisoryLog::new(),
        }
    }

    pub fn instrument(&self) -> &InstrumentProfile {
        &self.instrument
    }

    pub fn conditions(&self) -> &ObservingConditions {
        &self.conditions
    }

    /// Define the conditions for the observations.
    ///
    /// Nothing is changed if validation fails.
    ///
    /// # Errors
    ///
    /// [`EtcError::OutOfRange`] if `moon_illumination` is outside [0, 1].
    pub fn set_conditions(
        &mut self,
        seeing: Angle,
        moon_illumination: f64,
        airmass: f64,
    ) -> Result<(), EtcError> {
        self.conditions = ObservingConditions::new(seeing, moon_illumination, airmass)?;
        Ok(())
    }

    /// Photon rate per pixel for a target of this magnitude in this band.
    ///
    /// Scales the flux service's photon flux density by the telescope
    /// collecting area and the pixel footprint on the sky.
    ///
    /// # Errors
    ///
    /// - [`EtcError::InvalidBand`] if the instrument does not carry `band`
    /// - [`EtcError::InvalidArgument`] for a non-finite magnitude
    /// - [`EtcError::Flux`] if the flux service fails
    pub fn photon_rate(
        &mut self,
        band: &str,
        magnitude: impl Into<Magnitude>,
    ) -> Result<PhotonRate, EtcError> {
        let band = self.instrument.band(band)?;
        let magnitude = magnitude.into();
        if !magnitude.value().is_finite() {
            return Err(EtcError::InvalidArgument(format!(
                "magnitude must be finite, got {}",
                magnitude.value()
            )));
        }

        let (system, bits) = magnitude.cache_key();
        let key = (band, system, bits);
        if let Some(rate) = self.rate_cache.get(&key) {
            return Ok(*rate);
        }

        let flux = self.flux_source.photon_flux(
            band,
            magnitude,
            &self.instrument.name,
            &self.instrument.observatory,
        )?;
        let rate = flux.per_pixel(
            self.instrument.telescope.collecting_area(),
            self.instrument.detector.pixel_footprint(),
        );
        log::debug!("photon rate for {band} at {magnitude}: {rate}");

        self.rate_cache.insert(key, rate);
        Ok(rate)
    }

    /// Signal-to-noise ratio of NDIT exposures of DIT each.
    ///
    /// Raises linearity/saturation advisories on the per-DIT signal; a
    /// saturated DIT is clamped to the saturation limit before stacking.
    ///
    /// # Errors
    ///
    /// [`EtcError::InvalidArgument`] if `dit` is not positive or `ndit` is
    /// zero, plus anything [`Self::photon_rate`] returns.
    pub fn signal_to_noise(
        &mut self,
        band: &str,
        magnitude: impl Into<Magnitude>,
        dit: Time,
        ndit: u32,
    ) -> Result<f64, EtcError> {
        validate_dit(dit)?;
        if ndit == 0 {
            return Err(EtcError::InvalidArgument(
                "NDIT must be at least 1".to_string(),
            ));
        }

        let rate = self.photon_rate(band, magnitude)?;
        let signal_per_dit = self.signal_per_dit(rate, dit);
        Ok(self.stacked_snr(signal_per_dit, dit, ndit))
    }

    /// Number of exposures of `dit` needed to reach `target_snr`.
    ///
    /// Returns the NDIT the search stopped at; when the exposure cap is hit
    /// this may fall short of the target. Use [`Self::estimate_ndit`] to
    /// tell the two cases apart.
    pub fn required_ndit(
        &mut self,
        band: &str,
        target_snr: f64,
        magnitude: impl Into<Magnitude>,
        dit: Time,
    ) -> Result<u32, EtcError> {
        self.estimate_ndit(band, target_snr, magnitude, dit)
            .map(|estimate| estimate.ndit)
    }

    /// Linear NDIT search with the outcome reported explicitly.
    ///
    /// The per-DIT signal does not depend on NDIT, so linearity/saturation
    /// advisories are raised once per call. The long-exposure advisory is
    /// raised at most once per call.
    ///
    /// # Errors
    ///
    /// [`EtcError::InvalidArgument`] if `dit` is not strictly positive, is too
    /// short for the exposure cap to fit in a `u32` NDIT, or `target_snr` is
    /// NaN, plus anything [`Self::photon_rate`] returns.
    pub fn estimate_ndit(
        &mut self,
        band: &str,
        target_snr: f64,
        magnitude: impl Into<Magnitude>,
        dit: Time,
    ) -> Result<NditEstimate, EtcError> {
        validate_dit(dit)?;
        if target_snr.is_nan() {
            return Err(EtcError::InvalidArgument(
                "target SNR must be a number".to_string(),
            ));
        }

        let long_exposure = Time::from_hours(LONG_EXPOSURE_HOURS);
        let max_exposure = Time::from_hours(MAX_EXPOSURE_HOURS);

        // One step of headroom for rounding in `dit * ndit`
        let steps_to_cap = (max_exposure.as_seconds() / dit.as_seconds()).ceil();
        if steps_to_cap >= f64::from(u32::MAX) {
            return Err(EtcError::InvalidArgument(format!(
                "DIT of {} s is too short to reach the exposure cap",
                dit.as_seconds()
            )));
        }

        let rate = self.photon_rate(band, magnitude)?;
        let signal_per_dit = self.signal_per_dit(rate, dit);

        let mut warned_long = false;
        let mut ndit: u32 = 0;
        loop {
            ndit += 1;

            let snr = self.stacked_snr(signal_per_dit, dit, ndit);
            let total_time = dit * f64::from(ndit);

            if snr >= target_snr {
                log::debug!("target SNR {target_snr} reached at NDIT={ndit} (SNR={snr:.3})");
                return Ok(NditEstimate {
                    ndit,
                    snr,
                    total_time,
                    outcome: SearchOutcome::TargetReached,
                });
            }

            if total_time >= long_exposure && !warned_long {
                self.advisories
                    .record(Advisory::LongExposure { total: total_time });
                warned_long = true;
            }

            if total_time >= max_exposure {
                self.advisories.record(Advisory::ExposureCapReached {
                    total: total_time,
                    ndit,
                });
                return Ok(NditEstimate {
                    ndit,
                    snr,
                    total_time,
                    outcome: SearchOutcome::TimeCapReached,
                });
            }
        }
    }

    /// Advisories recorded since the last [`Self::take_advisories`]
    pub fn advisories(&self) -> &[Advisory] {
        self.advisories.records()
    }

    pub fn take_advisories(&mut self) -> Vec<Advisory> {
        self.advisories.take()
    }

    /// Number of memoised (band, magnitude) photon rates
    pub fn cached_rates(&self) -> usize {
        self.rate_cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.rate_cache.clear();
    }

    /// Electrons collected in one DIT, clamped at saturation
    fn signal_per_dit(&mut self, rate: PhotonRate, dit: Time) -> Electrons {
        let detector = &self.instrument.detector;
        let signal = rate * dit * detector.quantum_yield();
        if signal > detector.linearity_limit() {
            self.advisories.record(Advisory::LinearityExceeded {
                signal,
                limit: detector.linearity_limit(),
            });
        }
        if signal > detector.saturation_limit() {
            self.advisories.record(Advisory::SaturationExceeded {
                signal,
                limit: detector.saturation_limit(),
            });
            return detector.saturation_limit();
        }
        signal
    }

    fn stacked_snr(&self, signal_per_dit: Electrons, dit: Time, ndit: u32) -> f64 {
        let detector = &self.instrument.detector;
        let n = f64::from(ndit);
        let signal = signal_per_dit * n;

        let readout_noise = detector.read_noise() * n;
        let dark_noise = detector.dark_current() * (dit * n);
        let photon_noise = signal.shot_noise();
        // TODO: add sky background once the conditions feed a sky model
        let noise = readout_noise + dark_noise + photon_noise;

        signal / noise
    }
}

fn validate_dit(dit: Time) -> Result<(), EtcError> {
    let seconds = dit.as_seconds();
    if !(seconds.is_finite() && seconds > 0.0) {
        return Err(EtcError::InvalidArgument(format!(
            "DIT must be positive, got {seconds} s"
        )));
    }
    Ok(())
}
