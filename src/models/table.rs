//! Linear interpolation over a tabulated calibration.

use crate::domain::TabulatedCalibrationSet;
use crate::math::interpolate_linear;
use crate::models::CalibrationCurve;

#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolationEvaluator {
    set: TabulatedCalibrationSet,
}

impl LinearInterpolationEvaluator {
    pub fn new(set: TabulatedCalibrationSet) -> Self {
        Self { set }
    }

    pub fn set(&self) -> &TabulatedCalibrationSet {
        &self.set
    }
}

impl CalibrationCurve for LinearInterpolationEvaluator {
    fn sensor_range(&self) -> (f64, f64) {
        self.set.sensor_range()
    }

    fn temperature_in_range(&self, v: f64) -> f64 {
        interpolate_linear(self.set.sensor_values(), self.set.temperatures(), v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluate_curve;

    fn evaluator(temperatures: Vec<f64>, sensor_values: Vec<f64>) -> LinearInterpolationEvaluator {
        LinearInterpolationEvaluator::new(TabulatedCalibrationSet::from_rows(temperatures, sensor_values).unwrap())
    }

    #[test]
    fn node_queries_are_exact() {
        // Diode-like: voltage falls as temperature rises.
        let ev = evaluator(vec![1.4, 4.2, 77.0, 300.0], vec![1.64, 1.57, 1.02, 0.52]);
        let out = evaluate_curve(&ev, &[1.64, 1.57, 1.02, 0.52]);
        assert_eq!(out.temperatures, vec![1.4, 4.2, 77.0, 300.0]);
    }

    #[test]
    fn midpoint_is_mean_of_neighbours() {
        let ev = evaluator(vec![10.0, 30.0, 50.0], vec![1.0, 3.0, 5.0]);
        let out = evaluate_curve(&ev, &[2.0, 4.0]);
        assert!((out.temperatures[0] - 20.0).abs() < 1e-12);
        assert!((out.temperatures[1] - 40.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_table_range_masked_with_single_notice() {
        let ev = evaluator(vec![10.0, 100.0], vec![1.0, 10.0]);
        let out = evaluate_curve(&ev, &[0.0, 5.0, 15.0]);
        assert!(out.temperatures[0].is_nan());
        assert!((out.temperatures[1] - 50.0).abs() < 1e-12);
        assert!(out.temperatures[2].is_nan());

        let notice = out.notice.unwrap();
        assert_eq!(notice.replaced, 2);
        assert_eq!((notice.low, notice.high), (1.0, 10.0));
    }
}
