//! Export converted readings to CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;

/// Write `reading,temperature_k` rows; out-of-range temperatures are written as `NaN`.
pub fn write_conversions_csv(
    path: &Path,
    readings: &[f64],
    temperatures: &[f64],
) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "reading,temperature_k")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (v, t) in readings.iter().zip(temperatures.iter()) {
        writeln!(file, "{v},{}", fmt_temperature(*t))
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

fn fmt_temperature(t: f64) -> String {
    if t.is_nan() { "NaN".to_string() } else { format!("{t:.6}") }
}
