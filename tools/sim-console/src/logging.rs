//! Log output for the console.
//!
//! The terminal is owned by the UI while the console runs, so logs go to a
//! file. `RUST_LOG` takes precedence over the configured level.

use std::fs::OpenOptions;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ConfigError, ConsoleConfig};

/// Logging initialization errors.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(transparent)]
    Filter(#[from] ConfigError),

    #[error("failed to open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global `tracing` subscriber writing to `config.log_file`.
pub fn init_logging(config: &ConsoleConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|_| ConfigError::InvalidLogFilter(config.log_level.clone()))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(
        base_url = %config.base_url,
        refresh_secs = config.refresh_interval.as_secs(),
        "sim-console logging initialized"
    );

    Ok(())
}
