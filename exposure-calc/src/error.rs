//! Error types for the exposure time calculator

use thiserror::Error;

use crate::photometry::filters::{format_bands, Band};
use crate::photometry::FluxError;

/// Errors raised by calculator entry points.
///
/// Validation failures abort the call before any state is touched.
#[derive(Debug, Error)]
pub enum EtcError {
    /// Band identifier is not one the instrument carries
    #[error("unexpected band '{band}', expected one of [{}]", format_bands(.valid))]
    InvalidBand { band: String, valid: Vec<Band> },

    /// Value outside its allowed closed interval
    #[error("{name} must be between {min} and {max}, but got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("flux service failed: {0}")]
    Flux(#[from] FluxError),

    #[error("instrument profile I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("instrument profile is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
