//! Formatted terminal output.
//!
//! Formatting lives here so the evaluators and loaders stay free of
//! presentation concerns.

use crate::domain::SensorKind;
use crate::io::curve::CurveGrid;
use crate::io::loader::NotFound;
use crate::models::{Evaluator, Thermometer};
use crate::report::conversion_stats;

/// Header plus per-segment (or table) details for a thermometer.
pub fn format_calibration_summary(thermometer: &Thermometer) -> String {
    let kind = thermometer.kind();
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", thermometer.label()));
    out.push_str(&format!("Sensor: {:?} ({}, {})\n", kind, kind.quantity(), kind.unit()));

    let Some(evaluator) = thermometer.evaluator() else {
        out.push_str("Calibration: none loaded\n");
        return out;
    };

    let (lo, hi) = evaluator.sensor_range();
    out.push_str(&format!("Range: [{}, {}] {}\n", lo, hi, kind.unit()));

    match evaluator {
        Evaluator::Chebyshev(ev) => {
            let set = ev.set();
            out.push_str(&format!("Calibration: Chebyshev, {} fit ranges\n", set.segments().len()));
            for (idx, seg) in set.segments().iter().enumerate() {
                out.push_str(&format!(
                    "  #{:<2} type={} order={:<2} sensor=[{}, {}] z=[{}, {}] c0={:.6}\n",
                    idx + 1,
                    seg.fit_type,
                    seg.order(),
                    seg.sensor_lower,
                    seg.sensor_upper,
                    seg.z_lower,
                    seg.z_upper,
                    seg.coefficients[0],
                ));
            }
            let overlaps = set.overlapping_pairs();
            if !overlaps.is_empty() {
                let pairs: Vec<String> = overlaps.iter().map(|(a, b)| format!("#{}/#{}", a + 1, b + 1)).collect();
                out.push_str(&format!("  overlapping fit ranges: {} (later range wins)\n", pairs.join(", ")));
            }
        }
        Evaluator::Linear(ev) => {
            out.push_str(&format!("Calibration: table, {} rows\n", ev.set().len()));
        }
    }

    out
}

/// Reading -> temperature table with a short footer.
pub fn format_conversions(readings: &[f64], temperatures: &[f64], kind: SensorKind) -> String {
    let mut out = String::new();
    let header = format!("reading [{}]", kind.unit());
    out.push_str(&format!("{:>16} {:>14}\n", header, "T [K]"));
    out.push_str(&format!("{:->16} {:->14}\n", "", ""));

    for (v, t) in readings.iter().zip(temperatures.iter()) {
        out.push_str(&format!("{:>16} {:>14}\n", fmt_reading(*v), fmt_temperature(*t)));
    }

    let stats = conversion_stats(temperatures);
    out.push_str(&format!("\n{} of {} readings converted", stats.converted, stats.n));
    if let (Some(lo), Some(hi)) = (stats.t_min, stats.t_max) {
        out.push_str(&format!(" | T=[{lo:.3}, {hi:.3}] K"));
    }
    out.push('\n');

    out
}

pub fn format_curve_grid(grid: &CurveGrid, kind: SensorKind) -> String {
    format_conversions(&grid.sensor, &grid.temperature_k, kind)
}

/// One line per failed load attempt.
pub fn format_load_failures(not_found: &NotFound) -> String {
    let mut out = format!("No calibration data under {}\n", not_found.path.display());
    for failure in &not_found.failures {
        out.push_str(&format!("  - {failure}\n"));
    }
    out
}

fn fmt_reading(v: f64) -> String {
    if v.abs() >= 1e5 || (v != 0.0 && v.abs() < 1e-3) {
        format!("{v:.6e}")
    } else {
        format!("{v:.6}")
    }
}

fn fmt_temperature(t: f64) -> String {
    if t.is_finite() { format!("{t:.4}") } else { "NaN".to_string() }
}
