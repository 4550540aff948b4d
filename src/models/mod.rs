//! Calibration-curve evaluators.
//!
//! Both evaluators share one design: a valid sensor range plus a per-reading
//! temperature function. [`evaluate_curve`] masks the batch once against the
//! range and evaluates the surviving readings independently, which is what
//! makes large batches safe to spread over the rayon pool.

use rayon::prelude::*;

use crate::math::{RangeNotice, mask_out_of_range};

pub mod chebyshev;
pub mod table;
pub mod thermometer;

pub use chebyshev::*;
pub use table::*;
pub use thermometer::*;

/// Batches at least this long are evaluated in parallel.
pub const PARALLEL_MIN_LEN: usize = 4096;

/// A calibration curve that maps sensor readings to kelvin.
pub trait CalibrationCurve: Sync {
    /// Inclusive `(low, high)` range of readings the curve accepts.
    fn sensor_range(&self) -> (f64, f64);

    /// Temperature for a reading already known to be inside `sensor_range`.
    ///
    /// NaN when no part of the curve covers the reading.
    fn temperature_in_range(&self, v: f64) -> f64;
}

/// Temperatures for one batch plus the aggregated out-of-range notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub temperatures: Vec<f64>,
    pub notice: Option<RangeNotice>,
}

/// Mask `values` against the curve's range, then evaluate every kept reading.
pub fn evaluate_curve<C: CalibrationCurve + ?Sized>(curve: &C, values: &[f64]) -> Evaluation {
    let (low, high) = curve.sensor_range();
    let mask = mask_out_of_range(values, low, high);

    let temperatures: Vec<f64> = if mask.values.len() >= PARALLEL_MIN_LEN {
        mask.values
            .par_iter()
            .zip(mask.keep.par_iter())
            .map(|(&v, &keep)| if keep { curve.temperature_in_range(v) } else { f64::NAN })
            .collect()
    } else {
        mask.values
            .iter()
            .zip(mask.keep.iter())
            .map(|(&v, &keep)| if keep { curve.temperature_in_range(v) } else { f64::NAN })
            .collect()
    };

    Evaluation {
        temperatures,
        notice: mask.notice(),
    }
}
