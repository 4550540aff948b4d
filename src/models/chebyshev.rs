//! Piecewise Chebyshev evaluation.
//!
//! Each fit segment covers `[sensor_lower, sensor_upper]` and normalizes the
//! reading with its own `[z_lower, z_upper]` window. Readings that fall in a
//! gap between segments stay NaN. When segment ranges overlap, the last
//! segment (file order) that contains a reading is the one that evaluates it.

use log::debug;

use crate::domain::{ChebyshevCalibrationSet, FitSegment};
use crate::math::{chebyshev_series, normalized_coordinate};
use crate::models::CalibrationCurve;

impl FitSegment {
    /// Evaluate this segment's series at sensor reading `v`.
    pub fn evaluate(&self, v: f64) -> f64 {
        let k = normalized_coordinate(v, self.z_lower, self.z_upper);
        chebyshev_series(&self.coefficients, k)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseChebyshevEvaluator {
    set: ChebyshevCalibrationSet,
    range: (f64, f64),
}

impl PiecewiseChebyshevEvaluator {
    pub fn new(set: ChebyshevCalibrationSet) -> Self {
        for (a, b) in set.overlapping_pairs() {
            debug!(
                "fit ranges #{} and #{} overlap; readings in both use #{}",
                a + 1,
                b + 1,
                b + 1
            );
        }
        let range = set.sensor_range();
        Self { set, range }
    }

    pub fn set(&self) -> &ChebyshevCalibrationSet {
        &self.set
    }

    /// Index of the segment that evaluates `v` (last containing segment).
    pub fn segment_for(&self, v: f64) -> Option<usize> {
        self.set.segments().iter().rposition(|s| s.contains(v))
    }
}

impl CalibrationCurve for PiecewiseChebyshevEvaluator {
    fn sensor_range(&self) -> (f64, f64) {
        self.range
    }

    fn temperature_in_range(&self, v: f64) -> f64 {
        match self.segment_for(v) {
            Some(idx) => self.set.segments()[idx].evaluate(v),
            None => f64::NAN,
        }
    }
}
