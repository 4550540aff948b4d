//! Two-column calibration table parsing.
//!
//! Each data row is `temperature sensor_value`, whitespace separated.
//! `#` starts a comment and blank lines are skipped. Rows are re-sorted by
//! sensor value when the set is built (see `TabulatedCalibrationSet::from_rows`).

use std::fs;
use std::path::Path;

use crate::domain::TabulatedCalibrationSet;
use crate::error::CalibrationError;

pub fn parse_table(text: &str) -> Result<TabulatedCalibrationSet, CalibrationError> {
    let mut temperatures = Vec::new();
    let mut sensor_values = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let data = raw.split('#').next().unwrap_or("").trim();
        if data.is_empty() {
            continue;
        }

        let columns: Vec<&str> = data.split_whitespace().collect();
        if columns.len() != 2 {
            return Err(CalibrationError::MalformedTable {
                line,
                message: format!("expected 2 columns, found {}", columns.len()),
            });
        }

        let parse = |token: &str| {
            token.parse::<f64>().map_err(|_| CalibrationError::MalformedTable {
                line,
                message: format!("invalid number '{token}'"),
            })
        };
        temperatures.push(parse(columns[0])?);
        sensor_values.push(parse(columns[1])?);
    }

    TabulatedCalibrationSet::from_rows(temperatures, sensor_values)
}

pub fn load_table(path: &Path) -> Result<TabulatedCalibrationSet, CalibrationError> {
    if !path.is_file() {
        return Err(CalibrationError::FileMissing {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| CalibrationError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_table(&text)
}
