//! Write a sampled calibration curve as JSON.
//!
//! The file carries the full calibration dataset plus an evenly spaced grid
//! over its sensor range, so it can be re-plotted or compared without the
//! original calibration tree.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::{CalibrationSet, SensorKind};
use crate::error::{AppError, EvalError};
use crate::models::Thermometer;

#[derive(Debug, Clone, Serialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated: DateTime<Local>,
    pub label: String,
    pub kind: SensorKind,
    pub unit: String,
    pub sensor_range: (f64, f64),
    pub calibration: CalibrationSet,
    pub grid: CurveGrid,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurveGrid {
    pub sensor: Vec<f64>,
    pub temperature_k: Vec<f64>,
}

/// Evaluate `n` evenly spaced readings across the calibrated range (ends included).
pub fn sample_curve(thermometer: &Thermometer, n: usize) -> Result<CurveGrid, EvalError> {
    let evaluator = thermometer.evaluator().ok_or_else(|| EvalError::NoCalibrationData {
        label: thermometer.label(),
    })?;
    let (lo, hi) = evaluator.sensor_range();
    let n = n.max(2);

    let sensor: Vec<f64> = (0..n)
        .map(|i| {
            if i == n - 1 {
                hi
            } else {
                lo + (hi - lo) * i as f64 / (n as f64 - 1.0)
            }
        })
        .collect();
    let temperature_k = evaluator.evaluate(&sensor).temperatures;

    Ok(CurveGrid { sensor, temperature_k })
}

pub fn build_curve_file(thermometer: &Thermometer, n: usize) -> Result<CurveFile, EvalError> {
    let grid = sample_curve(thermometer, n)?;
    let evaluator = thermometer.evaluator().ok_or_else(|| EvalError::NoCalibrationData {
        label: thermometer.label(),
    })?;

    Ok(CurveFile {
        tool: "thermo".to_string(),
        generated: Local::now(),
        label: thermometer.label(),
        kind: thermometer.kind(),
        unit: thermometer.kind().unit().to_string(),
        sensor_range: evaluator.sensor_range(),
        calibration: evaluator.to_set(),
        grid,
    })
}

pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TabulatedCalibrationSet, ThermometerId};

    fn thermometer() -> Thermometer {
        let set = TabulatedCalibrationSet::from_rows(vec![300.0, 77.0, 4.2], vec![0.5, 1.0, 1.6]).unwrap();
        Thermometer::new(
            ThermometerId::new("DT-670", None),
            SensorKind::Diode,
            CalibrationSet::Tabulated(set),
        )
    }

    #[test]
    fn grid_spans_range_without_nan() {
        let grid = sample_curve(&thermometer(), 11).unwrap();
        assert_eq!(grid.sensor.len(), 11);
        assert_eq!(grid.sensor[0], 0.5);
        assert_eq!(grid.sensor[10], 1.6);
        assert!(grid.temperature_k.iter().all(|t| t.is_finite()));
        assert_eq!(grid.temperature_k[0], 300.0);
        assert_eq!(grid.temperature_k[10], 4.2);
    }

    #[test]
    fn curve_file_serializes_with_source_tag() {
        let curve = build_curve_file(&thermometer(), 5).unwrap();
        let json = serde_json::to_value(&curve).unwrap();
        assert_eq!(json["tool"], "thermo");
        assert_eq!(json["kind"], "diode");
        assert_eq!(json["calibration"]["source"], "tabulated");
        assert_eq!(json["grid"]["sensor"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn uncalibrated_thermometer_cannot_be_sampled() {
        let therm = Thermometer::uncalibrated(ThermometerId::new("DT-670", None), SensorKind::Diode);
        assert!(sample_curve(&therm, 10).is_err());
    }
}
