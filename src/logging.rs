//! Tracing setup. The terminal belongs to the UI, so events only go to a file.

use std::fs::OpenOptions;
use std::sync::{Mutex, Once};

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

static INIT: Once = Once::new();

/// Installs the global subscriber once. Returns false when logging stays off
/// (no file configured, or already initialized).
pub fn init(config: &LogConfig) -> AppResult<bool> {
    let Some(path) = config.file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| {
            AppError::io_with_context(source, format!("failed to open log file: {}", path.display()))
        })?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|err| AppError::invalid_argument(format!("invalid log filter: {err}")))?;

    let mut installed = false;
    INIT.call_once(|| {
        installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
            .compact()
            .try_init()
            .is_ok();
    });
    Ok(installed)
}
