//! A thermometer: identity, sensor kind, and (maybe) a calibration.
//!
//! The calibration shape is resolved once, when the thermometer is built, into
//! an [`Evaluator`]. A thermometer without calibration data is still a valid
//! value; only evaluating it fails.

use log::warn;

use crate::domain::{CalibrationSet, Readings, SensorKind, ThermometerId};
use crate::error::EvalError;
use crate::models::{
    CalibrationCurve, Evaluation, LinearInterpolationEvaluator, PiecewiseChebyshevEvaluator, evaluate_curve,
};

/// Evaluator selected from the calibration shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluator {
    Chebyshev(PiecewiseChebyshevEvaluator),
    Linear(LinearInterpolationEvaluator),
}

impl Evaluator {
    pub fn from_set(set: CalibrationSet) -> Self {
        match set {
            CalibrationSet::Chebyshev(set) => Evaluator::Chebyshev(PiecewiseChebyshevEvaluator::new(set)),
            CalibrationSet::Tabulated(set) => Evaluator::Linear(LinearInterpolationEvaluator::new(set)),
        }
    }

    pub fn curve(&self) -> &dyn CalibrationCurve {
        match self {
            Evaluator::Chebyshev(ev) => ev,
            Evaluator::Linear(ev) => ev,
        }
    }

    pub fn evaluate(&self, values: &[f64]) -> Evaluation {
        evaluate_curve(self.curve(), values)
    }

    pub fn sensor_range(&self) -> (f64, f64) {
        self.curve().sensor_range()
    }

    /// Owned copy of the backing dataset (for exports).
    pub fn to_set(&self) -> CalibrationSet {
        match self {
            Evaluator::Chebyshev(ev) => CalibrationSet::Chebyshev(ev.set().clone()),
            Evaluator::Linear(ev) => CalibrationSet::Tabulated(ev.set().clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Thermometer {
    id: ThermometerId,
    kind: SensorKind,
    evaluator: Option<Evaluator>,
}

impl Thermometer {
    pub fn new(id: ThermometerId, kind: SensorKind, set: CalibrationSet) -> Self {
        Self {
            id,
            kind,
            evaluator: Some(Evaluator::from_set(set)),
        }
    }

    /// A thermometer whose calibration could not be loaded.
    pub fn uncalibrated(id: ThermometerId, kind: SensorKind) -> Self {
        Self {
            id,
            kind,
            evaluator: None,
        }
    }

    pub fn id(&self) -> &ThermometerId {
        &self.id
    }

    pub fn label(&self) -> String {
        self.id.label()
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn evaluator(&self) -> Option<&Evaluator> {
        self.evaluator.as_ref()
    }

    pub fn is_calibrated(&self) -> bool {
        self.evaluator.is_some()
    }

    fn require_evaluator(&self) -> Result<&Evaluator, EvalError> {
        self.evaluator.as_ref().ok_or_else(|| EvalError::NoCalibrationData { label: self.label() })
    }

    /// Evaluate a batch and return the notice as data instead of logging it.
    pub fn evaluate(&self, values: &[f64]) -> Result<Evaluation, EvalError> {
        Ok(self.require_evaluator()?.evaluate(values))
    }

    /// Convert readings (volts or ohms) to kelvin, keeping the input shape.
    ///
    /// Out-of-range readings become NaN and produce one warning per call.
    pub fn temperature(&self, readings: impl Into<Readings>) -> Result<Readings, EvalError> {
        let readings = readings.into();
        let evaluation = self.evaluate(readings.as_slice())?;
        if let Some(notice) = &evaluation.notice {
            warn!("{}: {notice}", self.label());
        }
        Ok(readings.reshape(evaluation.temperatures))
    }
}
