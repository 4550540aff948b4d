//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - thermometer identity and sensor family (`ThermometerId`, `SensorKind`)
//! - the two calibration shapes (`ChebyshevCalibrationSet`, `TabulatedCalibrationSet`)
//! - shape-preserving readings (`Readings`)

pub mod types;

pub use types::*;
