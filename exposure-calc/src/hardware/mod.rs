//! Hardware module for telescope, detector and instrument configurations

pub mod detector;
pub mod instrument;
pub mod telescope;

pub use detector::DetectorConfig;
pub use instrument::{models, InstrumentProfile};
pub use telescope::TelescopeConfig;
