//! Logger initialisation and export of results to CSV files.
use crate::errors::NumericalError;
use crate::numerical::iteration_trace::{IterationTrace, TraceValue};
use chrono::Local;
use csv::Writer;
use log::LevelFilter;
use nalgebra::DVector;
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use std::path::Path;

/// maps a level name to a filter; None means logging is switched off
pub fn level_filter(loglevel: Option<&str>) -> Result<LevelFilter, NumericalError> {
    match loglevel {
        None => Ok(LevelFilter::Info),
        Some(level) => match level.to_lowercase().as_str() {
            "debug" => Ok(LevelFilter::Debug),
            "info" => Ok(LevelFilter::Info),
            "warn" => Ok(LevelFilter::Warn),
            "error" => Ok(LevelFilter::Error),
            "off" | "none" => Ok(LevelFilter::Off),
            other => Err(NumericalError::InvalidConfig(format!(
                "loglevel must be debug, info, warn, error, off or none, got {}",
                other
            ))),
        },
    }
}

/// Terminal logger, plus a `log_<date>_<time>.txt` file when `log_to_file` is set.
/// A logger already installed by an earlier call stays in place.
pub fn init_logger(loglevel: Option<&str>, log_to_file: bool) -> Result<(), NumericalError> {
    let log_option = level_filter(loglevel)?;
    if log_option == LevelFilter::Off {
        return Ok(());
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if log_to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        loggers.push(WriteLogger::new(log_option, Config::default(), File::create(name)?));
    }
    if CombinedLogger::init(loggers).is_err() {
        log::debug!("logger already initialised");
    }
    Ok(())
}

/// Writes every record of the trace as a CSV row under the trace's column names.
pub fn save_trace_to_csv<V: TraceValue, P: AsRef<Path>>(
    trace: &IterationTrace<V>,
    path: P,
) -> Result<(), NumericalError> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(trace.column_names())?;
    for row in trace.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Two-column CSV, e.g. a boundary value problem solution on its grid.
pub fn save_xy_to_csv<P: AsRef<Path>>(
    x: &DVector<f64>,
    y: &DVector<f64>,
    headers: (&str, &str),
    path: P,
) -> Result<(), NumericalError> {
    if x.len() != y.len() {
        return Err(NumericalError::Precondition(format!(
            "x has {} values, y has {}",
            x.len(),
            y.len()
        )));
    }
    let mut writer = Writer::from_path(path)?;
    writer.write_record([headers.0, headers.1])?;
    for (xi, yi) in x.iter().zip(y.iter()) {
        writer.write_record([xi.to_string(), yi.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
