//! Logging setup for debugging and error tracking.
//!
//! File logging is opt-in via `[logging]` in the config; the TUI owns
//! the terminal, so nothing is ever written to stdout/stderr while the
//! panel runs.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use crate::config::LoggingConfig;

/// Initialize fern file logging when enabled in config. Returns the
/// log file path when logging was set up.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let level = match config.level.as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    let dir = dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("ticketscout");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("ticketscout.log");

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] {}: {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(&path)?)
        .apply()?;

    log::info!("logging initialized");
    Ok(Some(path))
}
