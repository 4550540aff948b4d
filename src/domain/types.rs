//! Shared domain types.
//!
//! Calibration sets are immutable once built: they are validated at
//! construction and only read afterwards. Both shapes expose their valid
//! sensor range so the evaluators can mask readings before evaluating.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::CalibrationError;

/// Physical sensor family. Only affects units and labels, never evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SensorKind {
    /// Silicon/GaAlAs diode read as a forward voltage.
    Diode,
    /// Resistive sensor (RuOx, Cernox, ...) read as a resistance.
    Thermistor,
}

impl SensorKind {
    pub fn unit(self) -> &'static str {
        match self {
            SensorKind::Diode => "V",
            SensorKind::Thermistor => "Ω",
        }
    }

    pub fn quantity(self) -> &'static str {
        match self {
            SensorKind::Diode => "voltage",
            SensorKind::Thermistor => "resistance",
        }
    }
}

/// Identifies one physical thermometer in the calibration tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThermometerId {
    pub model: String,
    pub serial: Option<String>,
    /// Human-readable override; see [`ThermometerId::label`].
    pub label: Option<String>,
}

impl ThermometerId {
    pub fn new(model: impl Into<String>, serial: Option<String>) -> Self {
        Self {
            model: model.into(),
            serial,
            label: None,
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    /// `label` if set, otherwise `model/serial` (or just `model`).
    pub fn label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        match &self.serial {
            Some(serial) => format!("{}/{}", self.model, serial),
            None => self.model.clone(),
        }
    }
}

/// One Chebyshev fit range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitSegment {
    /// Fit-range index as written in the file (informational).
    pub fit_range: i64,
    /// Fit-type code as written in the file (informational).
    pub fit_type: i64,
    pub z_lower: f64,
    pub z_upper: f64,
    pub sensor_lower: f64,
    pub sensor_upper: f64,
    /// `c_0 ..= c_p`; a single coefficient is a constant-temperature segment.
    pub coefficients: Vec<f64>,
}

impl FitSegment {
    pub fn order(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Inclusive membership test on the sensor range.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.sensor_lower && v <= self.sensor_upper
    }

    fn validate(&self, index: usize) -> Result<(), CalibrationError> {
        let invalid = |message: String| CalibrationError::InvalidSegment { index, message };

        let bounds = [self.z_lower, self.z_upper, self.sensor_lower, self.sensor_upper];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(invalid("non-finite range bound".to_string()));
        }
        if self.sensor_upper <= self.sensor_lower {
            return Err(invalid(format!(
                "sensor upper bound {} is not above lower bound {}",
                self.sensor_upper, self.sensor_lower
            )));
        }
        if self.z_upper == self.z_lower {
            return Err(invalid(format!("degenerate normalization window at {}", self.z_lower)));
        }
        if self.coefficients.is_empty() {
            return Err(invalid("no coefficients".to_string()));
        }
        if self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(invalid("non-finite coefficient".to_string()));
        }
        Ok(())
    }
}

/// Piecewise Chebyshev calibration (ordered fit segments).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChebyshevCalibrationSet {
    segments: Vec<FitSegment>,
}

impl ChebyshevCalibrationSet {
    pub fn new(segments: Vec<FitSegment>) -> Result<Self, CalibrationError> {
        if segments.is_empty() {
            return Err(CalibrationError::InvalidSegment {
                index: 0,
                message: "calibration has no fit ranges".to_string(),
            });
        }
        for (idx, seg) in segments.iter().enumerate() {
            seg.validate(idx)?;
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[FitSegment] {
        &self.segments
    }

    /// `(min sensor_lower, max sensor_upper)` across all segments.
    pub fn sensor_range(&self) -> (f64, f64) {
        self.segments.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.sensor_lower), hi.max(s.sensor_upper))
        })
    }

    /// Pairs of segments whose sensor ranges share more than a boundary point.
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for (i, a) in self.segments.iter().enumerate() {
            for (j, b) in self.segments.iter().enumerate().skip(i + 1) {
                if a.sensor_lower < b.sensor_upper && b.sensor_lower < a.sensor_upper {
                    out.push((i, j));
                }
            }
        }
        out
    }
}

/// Tabulated calibration, sorted ascending by sensor value (ties by temperature).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabulatedCalibrationSet {
    sensor_values: Vec<f64>,
    temperatures: Vec<f64>,
}

impl TabulatedCalibrationSet {
    /// Build from rows in file order; rows are re-sorted for monotonic lookup.
    pub fn from_rows(temperatures: Vec<f64>, sensor_values: Vec<f64>) -> Result<Self, CalibrationError> {
        if temperatures.len() != sensor_values.len() {
            return Err(CalibrationError::InvalidTable {
                message: format!(
                    "column length mismatch: {} temperatures vs {} sensor values",
                    temperatures.len(),
                    sensor_values.len()
                ),
            });
        }
        if temperatures.is_empty() {
            return Err(CalibrationError::InvalidTable {
                message: "table has no rows".to_string(),
            });
        }
        if temperatures.iter().chain(sensor_values.iter()).any(|v| !v.is_finite()) {
            return Err(CalibrationError::InvalidTable {
                message: "table contains non-finite values".to_string(),
            });
        }

        let mut rows: Vec<(f64, f64)> = sensor_values.into_iter().zip(temperatures).collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
        let (sensor_values, temperatures): (Vec<f64>, Vec<f64>) = rows.into_iter().unzip();

        Ok(Self {
            sensor_values,
            temperatures,
        })
    }

    pub fn sensor_values(&self) -> &[f64] {
        &self.sensor_values
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn len(&self) -> usize {
        self.sensor_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensor_values.is_empty()
    }

    pub fn sensor_range(&self) -> (f64, f64) {
        // Sorted and non-empty by construction.
        (self.sensor_values[0], self.sensor_values[self.sensor_values.len() - 1])
    }
}

/// A loaded calibration of either shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum CalibrationSet {
    Chebyshev(ChebyshevCalibrationSet),
    Tabulated(TabulatedCalibrationSet),
}

impl CalibrationSet {
    pub fn sensor_range(&self) -> (f64, f64) {
        match self {
            CalibrationSet::Chebyshev(set) => set.sensor_range(),
            CalibrationSet::Tabulated(set) => set.sensor_range(),
        }
    }

    pub fn source_name(&self) -> &'static str {
        match self {
            CalibrationSet::Chebyshev(_) => "chebyshev",
            CalibrationSet::Tabulated(_) => "table",
        }
    }
}

/// Sensor readings or temperatures, keeping the caller's shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Readings {
    Scalar(f64),
    Series(Vec<f64>),
}

impl Readings {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Readings::Scalar(v) => std::slice::from_ref(v),
            Readings::Series(values) => values,
        }
    }

    /// Wrap `values` in the same shape as `self`.
    ///
    /// A scalar shape expects exactly one value.
    pub fn reshape(&self, values: Vec<f64>) -> Readings {
        match self {
            Readings::Scalar(_) if values.len() == 1 => Readings::Scalar(values[0]),
            _ => Readings::Series(values),
        }
    }

    pub fn scalar(&self) -> Option<f64> {
        match self {
            Readings::Scalar(v) => Some(*v),
            Readings::Series(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Readings::Scalar(v) => vec![v],
            Readings::Series(values) => values,
        }
    }
}

impl From<f64> for Readings {
    fn from(value: f64) -> Self {
        Readings::Scalar(value)
    }
}

impl From<Vec<f64>> for Readings {
    fn from(values: Vec<f64>) -> Self {
        Readings::Series(values)
    }
}

impl From<&[f64]> for Readings {
    fn from(values: &[f64]) -> Self {
        Readings::Series(values.to_vec())
    }
}
