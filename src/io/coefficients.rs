//! Chebyshev coefficient (`.cof`) file parsing.
//!
//! The format is line oriented with one value per line; the value is the last
//! whitespace-separated token (anything before it is a caption such as
//! `Fit range:`). Layout:
//!
//! ```text
//! N                         number of fit ranges
//! repeated N times:
//!   fit range index
//!   fit type code
//!   order p
//!   z_lower, z_upper
//!   sensor_lower, sensor_upper
//!   p + 1 coefficient lines
//! ```
//!
//! Blank lines are ignored.

use std::fs;
use std::path::Path;

use crate::domain::{ChebyshevCalibrationSet, FitSegment};
use crate::error::CalibrationError;

/// A single parsed token: integer preferred, then float, then raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum CofValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CofValue {
    pub fn parse(token: &str) -> Self {
        if let Ok(v) = token.parse::<i64>() {
            return CofValue::Int(v);
        }
        if let Ok(v) = token.parse::<f64>() {
            return CofValue::Float(v);
        }
        CofValue::Text(token.to_string())
    }
}

/// Line cursor over a coefficient file that yields typed values.
struct ValueReader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    last_line: usize,
}

impl<'a> ValueReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            last_line: 0,
        }
    }

    fn next_value(&mut self, what: &str) -> Result<(usize, CofValue), CalibrationError> {
        for (idx, line) in self.lines.by_ref() {
            self.last_line = idx + 1;
            if let Some(token) = line.split_whitespace().last() {
                return Ok((idx + 1, CofValue::parse(token)));
            }
        }
        Err(CalibrationError::MalformedCoefficients {
            line: self.last_line,
            message: format!("unexpected end of file while reading {what}"),
        })
    }

    fn next_count(&mut self, what: &str) -> Result<usize, CalibrationError> {
        let (line, value) = self.next_value(what)?;
        match value {
            CofValue::Int(v) if v >= 0 => Ok(v as usize),
            other => Err(CalibrationError::MalformedCoefficients {
                line,
                message: format!("expected a non-negative integer for {what}, found {other:?}"),
            }),
        }
    }

    fn next_int(&mut self, what: &str) -> Result<i64, CalibrationError> {
        let (line, value) = self.next_value(what)?;
        match value {
            CofValue::Int(v) => Ok(v),
            other => Err(CalibrationError::MalformedCoefficients {
                line,
                message: format!("expected an integer for {what}, found {other:?}"),
            }),
        }
    }

    fn next_f64(&mut self, what: &str) -> Result<f64, CalibrationError> {
        let (line, value) = self.next_value(what)?;
        match value {
            CofValue::Int(v) => Ok(v as f64),
            CofValue::Float(v) => Ok(v),
            CofValue::Text(text) => Err(CalibrationError::MalformedCoefficients {
                line,
                message: format!("expected a number for {what}, found '{text}'"),
            }),
        }
    }
}

/// Parse coefficient file contents into a validated calibration set.
pub fn parse_coefficients(text: &str) -> Result<ChebyshevCalibrationSet, CalibrationError> {
    let mut reader = ValueReader::new(text);
    let n_ranges = reader.next_count("number of fit ranges")?;

    // Counts come from the file; storage grows only with values actually read.
    let mut segments = Vec::new();
    for _ in 0..n_ranges {
        let fit_range = reader.next_int("fit range index")?;
        let fit_type = reader.next_int("fit type")?;
        let order = reader.next_count("fit order")?;
        let z_lower = reader.next_f64("z lower bound")?;
        let z_upper = reader.next_f64("z upper bound")?;
        let sensor_lower = reader.next_f64("sensor lower bound")?;
        let sensor_upper = reader.next_f64("sensor upper bound")?;

        let mut coefficients = Vec::new();
        for i in 0..=order {
            coefficients.push(reader.next_f64(&format!("coefficient C({i})"))?);
        }

        segments.push(FitSegment {
            fit_range,
            fit_type,
            z_lower,
            z_upper,
            sensor_lower,
            sensor_upper,
            coefficients,
        });
    }

    ChebyshevCalibrationSet::new(segments)
}

/// Read and parse a coefficient file from disk.
pub fn load_coefficients(path: &Path) -> Result<ChebyshevCalibrationSet, CalibrationError> {
    if !path.is_file() {
        return Err(CalibrationError::FileMissing {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| CalibrationError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_coefficients(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RANGES: &str = "\
Number of fit ranges:  2
Fit range:  1
Fit type:  1
Order:  2
Zlower:  1.1
Zupper:  1.7
Lower limit:  1.1
Upper limit:  1.7
C(0):  10.5
C(1):  -6.25
C(2):  0.5

Fit range:  2
Fit type:  1
Order:  0
Zlower:  0.09
Zupper:  1.1
Lower limit:  0.09
Upper limit:  1.1
C(0):  150
";

    #[test]
    fn value_preference_is_int_float_text() {
        assert_eq!(CofValue::parse("3"), CofValue::Int(3));
        assert_eq!(CofValue::parse("3.0"), CofValue::Float(3.0));
        assert_eq!(CofValue::parse("-1.5e-3"), CofValue::Float(-1.5e-3));
        assert_eq!(CofValue::parse("Chebychev"), CofValue::Text("Chebychev".to_string()));
    }

    #[test]
    fn parses_captioned_two_range_file() {
        let set = parse_coefficients(TWO_RANGES).unwrap();
        let segs = set.segments();
        assert_eq!(segs.len(), 2);

        assert_eq!(segs[0].fit_range, 1);
        assert_eq!(segs[0].order(), 2);
        assert_eq!(segs[0].coefficients, vec![10.5, -6.25, 0.5]);
        assert_eq!((segs[0].z_lower, segs[0].z_upper), (1.1, 1.7));

        // Integer tokens are accepted where floats are expected.
        assert_eq!(segs[1].coefficients, vec![150.0]);
        assert_eq!(set.sensor_range(), (0.09, 1.7));
    }

    #[test]
    fn bare_values_without_captions() {
        let text = "1\n1\n1\n1\n0.5\n1.5\n0.5\n1.5\n2.0\n1.0\n";
        let set = parse_coefficients(text).unwrap();
        assert_eq!(set.segments()[0].coefficients, vec![2.0, 1.0]);
    }

    #[test]
    fn truncated_file_is_malformed() {
        let text = "Number of fit ranges: 1\nFit range: 1\nFit type: 1\nOrder: 3\n";
        let err = parse_coefficients(text).unwrap_err();
        assert!(matches!(err, CalibrationError::MalformedCoefficients { line: 4, .. }));
    }

    #[test]
    fn text_where_number_expected_reports_line() {
        let text = "1\n1\n1\n0\n0.5\nabc\n0.5\n1.5\n2.0\n";
        let err = parse_coefficients(text).unwrap_err();
        assert_eq!(
            err,
            CalibrationError::MalformedCoefficients {
                line: 6,
                message: "expected a number for z upper bound, found 'abc'".to_string(),
            }
        );
    }

    #[test]
    fn fractional_order_is_rejected() {
        let text = "1\n1\n1\n2.0\n0.5\n1.5\n0.5\n1.5\n2.0\n1.0\n0.1\n";
        assert!(matches!(
            parse_coefficients(text),
            Err(CalibrationError::MalformedCoefficients { line: 4, .. })
        ));
    }

    #[test]
    fn inverted_sensor_bounds_fail_validation() {
        let text = "1\n1\n1\n0\n0.5\n1.5\n1.5\n0.5\n2.0\n";
        assert!(matches!(
            parse_coefficients(text),
            Err(CalibrationError::InvalidSegment { index: 0, .. })
        ));
    }

    #[test]
    fn zero_ranges_is_invalid() {
        assert!(parse_coefficients("0\n").is_err());
    }

    #[test]
    fn huge_range_count_is_malformed_not_fatal() {
        assert!(matches!(
            parse_coefficients("99999999999999999\n"),
            Err(CalibrationError::MalformedCoefficients { line: 1, .. })
        ));
    }

    #[test]
    fn huge_order_is_malformed_not_fatal() {
        let text = "1\n1\n1\n9223372036854775807\n0.5\n1.5\n0.5\n1.5\n2.0\n";
        assert!(matches!(
            parse_coefficients(text),
            Err(CalibrationError::MalformedCoefficients { line: 9, .. })
        ));
    }
}
