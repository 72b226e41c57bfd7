//! Logging bootstrap for the command-line runs.
//!
//! # Invariants
//! - Logs go to stderr; stdout carries only the run reports.
//! - `RUST_LOG`, when set, overrides the requested level.

use flexi_logger::{Logger, LoggerHandle};
use log::info;

use crate::error::BiomassError;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Start the stderr logger. Keep the returned handle alive for the run.
///
/// # Errors
/// - `level` is not one of trace/debug/info/warn/error.
/// - The backend fails to start.
pub fn init_logging(level: &str) -> Result<LoggerHandle, BiomassError> {
    let level = normalize_level(level)?;
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()?;

    info!(
        "event=app_start status=ok level={} version={}",
        level,
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, BiomassError> {
    let wanted = level.trim().to_ascii_lowercase();
    LEVELS
        .iter()
        .find(|l| **l == wanted)
        .copied()
        .ok_or_else(|| BiomassError::InvalidData(format!("unsupported log level `{level}`")))
}
