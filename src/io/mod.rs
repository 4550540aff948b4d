//! Input/output helpers.
//!
//! - calibration discovery and loading (`loader`, `coefficients`, `table`)
//! - sensor readings from files (`ingest`)
//! - result exports (CSV/JSON) (`export`, `curve`)

pub mod coefficients;
pub mod curve;
pub mod export;
pub mod ingest;
pub mod loader;
pub mod table;

pub use coefficients::*;
pub use curve::*;
pub use export::*;
pub use ingest::*;
pub use loader::*;
pub use table::*;
