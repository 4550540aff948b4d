//! Read sensor readings from a text file.
//!
//! Values may be separated by whitespace, commas or semicolons; `#` starts a
//! comment. Any token that is not a number is an error (with its line), since
//! silently dropping a reading would shift every later result.

use std::fs;
use std::path::Path;

use crate::error::AppError;

pub fn parse_readings(text: &str) -> Result<Vec<f64>, String> {
    let mut values = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let data = raw.split('#').next().unwrap_or("");
        for token in data.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
            if token.is_empty() {
                continue;
            }
            let v = token
                .parse::<f64>()
                .map_err(|_| format!("line {}: invalid reading '{token}'", idx + 1))?;
            values.push(v);
        }
    }
    Ok(values)
}

pub fn load_readings(path: &Path) -> Result<Vec<f64>, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to open readings '{}': {e}", path.display())))?;
    parse_readings(&text).map_err(|e| AppError::new(2, format!("{}: {e}", path.display())))
}
