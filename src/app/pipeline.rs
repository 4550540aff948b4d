//! Shared "load then evaluate" logic used by every subcommand.

use log::warn;

use crate::cli::SensorArgs;
use crate::error::AppError;
use crate::io::loader::{CalibrationLoader, NotFound};
use crate::models::Thermometer;

/// A thermometer plus what went wrong while loading it, if anything.
#[derive(Debug, Clone)]
pub struct Session {
    pub thermometer: Thermometer,
    pub not_found: Option<NotFound>,
}

/// Resolve the calibration root and load the requested thermometer.
///
/// Never fails: a missing calibration leaves the thermometer uncalibrated.
pub fn open_session(args: &SensorArgs) -> Session {
    let loader = CalibrationLoader::with_override(args.root.as_deref());
    open_with_loader(&loader, args)
}

pub fn open_with_loader(loader: &CalibrationLoader, args: &SensorArgs) -> Session {
    let id = args.thermometer_id();
    match loader.load(&id).into_result() {
        Ok(set) => Session {
            thermometer: Thermometer::new(id, args.kind, set),
            not_found: None,
        },
        Err(not_found) => {
            for failure in &not_found.failures {
                warn!("{}: {failure}", id.label());
            }
            Session {
                thermometer: Thermometer::uncalibrated(id, args.kind),
                not_found: Some(not_found),
            }
        }
    }
}

/// Convert readings, logging the out-of-range notice once.
pub fn convert(session: &Session, readings: &[f64]) -> Result<Vec<f64>, AppError> {
    let temperatures = session.thermometer.temperature(readings)?;
    Ok(temperatures.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SensorKind;
    use std::fs;

    fn args(model: &str, serial: Option<&str>) -> SensorArgs {
        SensorArgs {
            model: model.to_string(),
            serial: serial.map(str::to_string),
            label: None,
            kind: SensorKind::Thermistor,
            root: None,
        }
    }

    #[test]
    fn missing_thermometer_converts_to_exit_code_3() {
        let root = std::env::temp_dir().join(format!("thermo-curves-pipeline-{}-missing", std::process::id()));
        let loader = CalibrationLoader::new(&root);
        let session = open_with_loader(&loader, &args("NOPE", None));

        assert!(session.not_found.is_some());
        let err = convert(&session, &[1.0]).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn table_thermometer_converts_batch() {
        let root = std::env::temp_dir().join(format!("thermo-curves-pipeline-{}-table", std::process::id()));
        let dir = root.join("RX-102A");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("RX-102A.txt"), "0.05 60000\n4.2 3000\n300 1000\n").unwrap();

        let loader = CalibrationLoader::new(&root);
        let session = open_with_loader(&loader, &args("RX-102A", None));
        assert!(session.not_found.is_none());

        let t = convert(&session, &[3000.0, 2000.0, 70000.0]).unwrap();
        assert_eq!(t[0], 4.2);
        assert!((t[1] - 152.1).abs() < 1e-9);
        assert!(t[2].is_nan());
    }

    #[test]
    fn coefficient_thermometer_converts_batch() {
        let root = std::env::temp_dir().join(format!("thermo-curves-pipeline-{}-cof", std::process::id()));
        let dir = root.join("DT-670").join("D6012345");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("D6012345.cof"), "1\n1\n1\n0\n0.5\n1.5\n0.5\n1.5\n77.0\n").unwrap();

        let loader = CalibrationLoader::new(&root);
        let session = open_with_loader(&loader, &args("DT-670", Some("D6012345")));
        assert!(session.not_found.is_none());
        assert!(session.thermometer.is_calibrated());

        let t = convert(&session, &[1.0, 2.0]).unwrap();
        assert_eq!(t[0], 77.0);
        assert!(t[1].is_nan());
    }
}
