//! Reporting utilities: batch statistics and formatted terminal output.

pub mod format;

pub use format::*;

/// Summary of one converted batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionStats {
    pub n: usize,
    /// Readings that produced a finite temperature.
    pub converted: usize,
    pub t_min: Option<f64>,
    pub t_max: Option<f64>,
}

/// Count finite results and their temperature span.
pub fn conversion_stats(temperatures: &[f64]) -> ConversionStats {
    let finite: Vec<f64> = temperatures.iter().copied().filter(|t| t.is_finite()).collect();
    let t_min = finite.iter().copied().reduce(f64::min);
    let t_max = finite.iter().copied().reduce(f64::max);

    ConversionStats {
        n: temperatures.len(),
        converted: finite.len(),
        t_min,
        t_max,
    }
}
