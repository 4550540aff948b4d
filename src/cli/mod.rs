//! Command-line parsing for the calibration-curve evaluator.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! loading and evaluation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{SensorKind, ThermometerId};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "thermo", version, about = "Cryogenic thermometer calibration curves")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert sensor readings (volts or ohms) to kelvin.
    Convert(ConvertArgs),
    /// Show what calibration data was found for a thermometer.
    Info(SensorArgs),
    /// Sample the calibration across its range, optionally exporting JSON.
    Curve(CurveArgs),
}

/// Which thermometer to use and where to look for it.
#[derive(Debug, Args, Clone)]
pub struct SensorArgs {
    /// Thermometer model (directory under the calibration root).
    #[arg(short = 'm', long)]
    pub model: String,

    /// Serial number (sub-directory; also names the `.cof` file).
    #[arg(short = 's', long)]
    pub serial: Option<String>,

    /// Label used in messages instead of `model/serial`.
    #[arg(long)]
    pub label: Option<String>,

    /// Sensor family; sets the reading unit.
    #[arg(short = 'k', long, value_enum, default_value_t = SensorKind::Diode)]
    pub kind: SensorKind,

    /// Calibration root (defaults to $THERMO_CALIBRATION_ROOT or ./calibrations).
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl SensorArgs {
    pub fn thermometer_id(&self) -> ThermometerId {
        ThermometerId::new(self.model.clone(), self.serial.clone()).with_label(self.label.clone())
    }
}

#[derive(Debug, Args, Clone)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub sensor: SensorArgs,

    /// Read additional readings from a file (whitespace/comma separated).
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Export `reading,temperature_k` rows to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Readings in the sensor's native unit.
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct CurveArgs {
    #[command(flatten)]
    pub sensor: SensorArgs,

    /// Number of grid points across the calibrated range.
    #[arg(short = 'n', long, default_value_t = 101)]
    pub points: usize,

    /// Export the curve (calibration + sampled grid) to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,

    /// Do not print the grid table.
    #[arg(long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_parses_values_and_sensor() {
        let cli = Cli::parse_from([
            "thermo", "convert", "-m", "DT-670", "-s", "D6012345", "--root", "/cal", "1.02", "0.5",
        ]);
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.values, vec![1.02, 0.5]);
        assert_eq!(args.sensor.kind, SensorKind::Diode);
        assert_eq!(args.sensor.thermometer_id().label(), "DT-670/D6012345");
        assert_eq!(args.sensor.root, Some(PathBuf::from("/cal")));
    }

    #[test]
    fn curve_defaults() {
        let cli = Cli::parse_from(["thermo", "curve", "-m", "RX-102A", "-k", "thermistor"]);
        let Command::Curve(args) = cli.command else {
            panic!("expected curve");
        };
        assert_eq!(args.points, 101);
        assert_eq!(args.sensor.kind, SensorKind::Thermistor);
        assert!(args.export_curve.is_none());
    }
}
