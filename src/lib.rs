//! `thermo-curves` library crate.
//!
//! Converts raw thermometer readings (diode voltages, thermistor resistances)
//! to kelvin using vendor calibration data: piecewise Chebyshev fits or
//! tabulated curves. The binary (`thermo`) is a thin wrapper around this
//! library so that:
//!
//! - evaluation is testable without spawning processes
//! - the evaluators can be embedded in acquisition code directly

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
