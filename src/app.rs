//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - locates and loads calibration data
//! - converts readings / samples curves
//! - prints reports and writes optional exports

use clap::Parser;
use log::info;

use crate::cli::{Command, ConvertArgs, CurveArgs, SensorArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `thermo` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Convert(args) => handle_convert(args),
        Command::Info(args) => handle_info(args),
        Command::Curve(args) => handle_curve(args),
    }
}

fn handle_convert(args: ConvertArgs) -> Result<(), AppError> {
    let mut readings = args.values.clone();
    if let Some(path) = &args.input {
        readings.extend(crate::io::load_readings(path)?);
    }
    if readings.is_empty() {
        return Err(AppError::new(2, "No readings given (pass values or --input FILE)."));
    }

    let session = pipeline::open_session(&args.sensor);
    let temperatures = pipeline::convert(&session, &readings)?;

    println!(
        "{}",
        crate::report::format_conversions(&readings, &temperatures, session.thermometer.kind())
    );

    if let Some(path) = &args.export {
        crate::io::write_conversions_csv(path, &readings, &temperatures)?;
        info!("wrote {}", path.display());
    }

    Ok(())
}

fn handle_info(args: SensorArgs) -> Result<(), AppError> {
    let session = pipeline::open_session(&args);

    println!("{}", crate::report::format_calibration_summary(&session.thermometer));
    if let Some(not_found) = &session.not_found {
        println!("{}", crate::report::format_load_failures(not_found));
        return Err(AppError::new(3, format!("{}: no calibration data loaded", session.thermometer.label())));
    }

    Ok(())
}

fn handle_curve(args: CurveArgs) -> Result<(), AppError> {
    let session = pipeline::open_session(&args.sensor);
    let curve = crate::io::build_curve_file(&session.thermometer, args.points)?;

    if !args.quiet {
        println!("{}", crate::report::format_curve_grid(&curve.grid, curve.kind));
    }

    if let Some(path) = &args.export_curve {
        crate::io::write_curve_json(path, &curve)?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
