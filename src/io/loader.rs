//! Locate and load calibration data for a thermometer.
//!
//! Directory layout under the calibration root:
//!
//! ```text
//! <root>/<model>/<model>.txt                     table (no serial)
//! <root>/<model>/<serial>/<serial>.cof           Chebyshev coefficients
//! <root>/<model>/<serial>/<model>.txt            table
//! ```
//!
//! The coefficient file is tried first (only when a serial is known); if it
//! is missing or malformed, the table is tried. The result is an explicit
//! [`LoadOutcome`] rather than a partially initialised thermometer.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::domain::{CalibrationSet, ChebyshevCalibrationSet, TabulatedCalibrationSet, ThermometerId};
use crate::error::CalibrationError;
use crate::io::coefficients::load_coefficients;
use crate::io::table::load_table;

/// Environment variable holding the default calibration root.
pub const ROOT_ENV: &str = "THERMO_CALIBRATION_ROOT";

/// Used when neither `--root` nor the environment provides one.
pub const DEFAULT_ROOT: &str = "calibrations";

/// What the loader found for one thermometer.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Coefficients(ChebyshevCalibrationSet),
    Tabulated(TabulatedCalibrationSet),
    NotFound(NotFound),
}

/// Every failed attempt, in the order they were made.
#[derive(Debug, Clone, PartialEq)]
pub struct NotFound {
    pub path: PathBuf,
    pub failures: Vec<CalibrationError>,
}

impl LoadOutcome {
    pub fn into_result(self) -> Result<CalibrationSet, NotFound> {
        match self {
            LoadOutcome::Coefficients(set) => Ok(CalibrationSet::Chebyshev(set)),
            LoadOutcome::Tabulated(set) => Ok(CalibrationSet::Tabulated(set)),
            LoadOutcome::NotFound(not_found) => Err(not_found),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalibrationLoader {
    root: PathBuf,
}

impl CalibrationLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root from `THERMO_CALIBRATION_ROOT` (a `.env` file is honoured), else `./calibrations`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let root = std::env::var_os(ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
        Self::new(root)
    }

    /// `--root` if given, otherwise [`CalibrationLoader::from_env`].
    pub fn with_override(root: Option<&Path>) -> Self {
        match root {
            Some(root) => Self::new(root),
            None => Self::from_env(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn thermometer_dir(&self, id: &ThermometerId) -> PathBuf {
        let dir = self.root.join(&id.model);
        match &id.serial {
            Some(serial) => dir.join(serial),
            None => dir,
        }
    }

    pub fn coefficient_path(&self, id: &ThermometerId) -> Option<PathBuf> {
        let serial = id.serial.as_ref()?;
        Some(self.thermometer_dir(id).join(format!("{serial}.cof")))
    }

    pub fn table_path(&self, id: &ThermometerId) -> PathBuf {
        self.thermometer_dir(id).join(format!("{}.txt", id.model))
    }

    pub fn load(&self, id: &ThermometerId) -> LoadOutcome {
        let dir = self.thermometer_dir(id);
        info!("{}: searching calibration data in {}", id.label(), dir.display());

        if !dir.is_dir() {
            return LoadOutcome::NotFound(NotFound {
                failures: vec![CalibrationError::ThermometerNotFound { path: dir.clone() }],
                path: dir,
            });
        }

        let mut failures = Vec::new();

        if let Some(path) = self.coefficient_path(id) {
            match load_coefficients(&path) {
                Ok(set) => {
                    info!("{}: loaded {} fit ranges from {}", id.label(), set.segments().len(), path.display());
                    return LoadOutcome::Coefficients(set);
                }
                Err(err @ CalibrationError::FileMissing { .. }) => failures.push(err),
                Err(err) => {
                    warn!("{}: {err}; trying calibration table", id.label());
                    failures.push(err);
                }
            }
        }

        let path = self.table_path(id);
        match load_table(&path) {
            Ok(set) => {
                info!("{}: loaded {} table rows from {}", id.label(), set.len(), path.display());
                LoadOutcome::Tabulated(set)
            }
            Err(err) => {
                failures.push(err);
                LoadOutcome::NotFound(NotFound { path: dir, failures })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

    /// Fresh, empty calibration root for one test.
    fn scratch_root() -> PathBuf {
        let n = NEXT_DIR.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("thermo-curves-loader-{}-{n}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    const COF: &str = "1\n1\n1\n0\n0.5\n1.5\n0.5\n1.5\n77.0\n";
    const TABLE: &str = "300 0.5\n4.2 1.5\n";

    fn diode_id() -> ThermometerId {
        ThermometerId::new("DT-670", Some("D6012345".to_string()))
    }

    #[test]
    fn missing_directory_is_not_found() {
        let loader = CalibrationLoader::new(scratch_root());
        match loader.load(&diode_id()) {
            LoadOutcome::NotFound(nf) => {
                assert!(matches!(nf.failures.as_slice(), [CalibrationError::ThermometerNotFound { .. }]));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn coefficients_take_precedence_over_table() {
        let root = scratch_root();
        let loader = CalibrationLoader::new(&root);
        let id = diode_id();
        write(&loader.coefficient_path(&id).unwrap(), COF);
        write(&loader.table_path(&id), TABLE);

        assert!(matches!(loader.load(&id), LoadOutcome::Coefficients(_)));
    }

    #[test]
    fn malformed_coefficients_fall_back_to_table() {
        let root = scratch_root();
        let loader = CalibrationLoader::new(&root);
        let id = diode_id();
        write(&loader.coefficient_path(&id).unwrap(), "2\n1\n");
        write(&loader.table_path(&id), TABLE);

        let LoadOutcome::Tabulated(table) = loader.load(&id) else {
            panic!("expected table fallback");
        };
        assert_eq!(table.sensor_values(), &[0.5, 1.5]);
        assert_eq!(table.temperatures(), &[300.0, 4.2]);
    }

    #[test]
    fn both_sources_failing_lists_each_failure() {
        let root = scratch_root();
        let loader = CalibrationLoader::new(&root);
        let id = diode_id();
        write(&loader.coefficient_path(&id).unwrap(), "oops\n");

        let LoadOutcome::NotFound(nf) = loader.load(&id) else {
            panic!("expected NotFound");
        };
        assert_eq!(nf.failures.len(), 2);
        assert!(matches!(nf.failures[0], CalibrationError::MalformedCoefficients { line: 1, .. }));
        assert!(matches!(nf.failures[1], CalibrationError::FileMissing { .. }));
    }

    #[test]
    fn model_without_serial_uses_table_only() {
        let root = scratch_root();
        let loader = CalibrationLoader::new(&root);
        let id = ThermometerId::new("RX-102A", None);
        assert_eq!(loader.coefficient_path(&id), None);
        write(&root.join("RX-102A").join("RX-102A.txt"), "0.05 60000\n300 1000\n");

        assert!(matches!(loader.load(&id), LoadOutcome::Tabulated(_)));
    }
}
