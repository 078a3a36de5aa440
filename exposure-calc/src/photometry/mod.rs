//! Photometry models: filters, magnitudes and photon fluxes

pub mod filters;
pub mod flux;
pub mod magnitude;

pub use filters::Band;
pub use flux::{FlatSpectrumFlux, FluxError, PhotonFlux, PhotonFluxSource};
pub use magnitude::{Magnitude, MagnitudeSystem};
