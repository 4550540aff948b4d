use std::path::PathBuf;

/// Process-level error used by the `thermo` binary.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why a calibration source could not be turned into a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// The `<root>/<model>[/<serial>]` directory does not exist.
    ThermometerNotFound { path: PathBuf },
    /// The directory exists but the expected file is absent.
    FileMissing { path: PathBuf },
    Io { path: PathBuf, message: String },
    MalformedCoefficients { line: usize, message: String },
    MalformedTable { line: usize, message: String },
    InvalidSegment { index: usize, message: String },
    InvalidTable { message: String },
}

impl std::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationError::ThermometerNotFound { path } => {
                write!(f, "Cannot find thermometer directory '{}'", path.display())
            }
            CalibrationError::FileMissing { path } => {
                write!(f, "Calibration file '{}' not found", path.display())
            }
            CalibrationError::Io { path, message } => {
                write!(f, "Failed to read '{}': {message}", path.display())
            }
            CalibrationError::MalformedCoefficients { line, message } => {
                write!(f, "Malformed coefficient file (line {line}): {message}")
            }
            CalibrationError::MalformedTable { line, message } => {
                write!(f, "Malformed calibration table (line {line}): {message}")
            }
            CalibrationError::InvalidSegment { index, message } => {
                write!(f, "Invalid fit range #{}: {message}", index + 1)
            }
            CalibrationError::InvalidTable { message } => {
                write!(f, "Invalid calibration table: {message}")
            }
        }
    }
}

impl std::error::Error for CalibrationError {}

/// Evaluation-time failure.
///
/// Out-of-range readings are never an error; they become NaN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    NoCalibrationData { label: String },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::NoCalibrationData { label } => {
                write!(f, "{label}: no calibration data loaded")
            }
        }
    }
}

impl std::error::Error for EvalError {}

impl From<CalibrationError> for AppError {
    fn from(err: CalibrationError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl From<EvalError> for AppError {
    fn from(err: EvalError) -> Self {
        AppError::new(3, err.to_string())
    }
}
