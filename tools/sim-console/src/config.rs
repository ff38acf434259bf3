//! Console configuration from environment variables and CLI overrides.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default dashboard auto-refresh period.
pub const DEFAULT_REFRESH_SECS: u64 = 10;

/// How long a flash message stays fully visible.
pub const FLASH_DISPLAY: Duration = Duration::from_secs(5);

/// How long a faded flash message lingers before removal.
pub const FLASH_FADE: Duration = Duration::from_millis(300);

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base URL must not be empty")]
    EmptyBaseUrl,

    #[error("base URL must start with http:// or https://, got '{0}'")]
    UnsupportedScheme(String),

    #[error("refresh interval must be greater than zero")]
    ZeroRefreshInterval,

    #[error("invalid log filter '{0}'")]
    InvalidLogFilter(String),
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Root URL of the simulation backend.
    pub base_url: String,

    /// Period of the dashboard auto-refresh.
    pub refresh_interval: Duration,

    /// Connect timeout for the HTTP client.
    pub connect_timeout: Duration,

    /// Flash message visible lifetime.
    pub flash_display: Duration,

    /// Flash message fade-out after the visible lifetime.
    pub flash_fade: Duration,

    /// File receiving log output (the terminal belongs to the UI).
    pub log_file: PathBuf,

    /// Log filter directive (trace, debug, info, warn, error, or an
    /// `EnvFilter` expression).
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            connect_timeout: Duration::from_secs(2),
            flash_display: FLASH_DISPLAY,
            flash_fade: FLASH_FADE,
            log_file: PathBuf::from("sim-console.log"),
            log_level: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SIM_CONSOLE_BASE_URL`: Backend root URL (default: http://127.0.0.1:5000)
    /// - `SIM_CONSOLE_REFRESH_SECS`: Dashboard refresh period (default: 10)
    /// - `SIM_CONSOLE_LOG_FILE`: Log file path (default: sim-console.log)
    /// - `SIM_CONSOLE_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: env::var("SIM_CONSOLE_BASE_URL").unwrap_or(defaults.base_url),

            refresh_interval: env::var("SIM_CONSOLE_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_interval),

            log_file: env::var("SIM_CONSOLE_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),

            log_level: env::var("SIM_CONSOLE_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            ..defaults
        }
    }

    /// Reject configurations the console cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::UnsupportedScheme(url.to_string()));
        }
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.refresh_interval, Duration::from_secs(10));
        assert_eq!(config.flash_display, Duration::from_secs(5));
        assert_eq!(config.flash_fade, Duration::from_millis(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ConsoleConfig {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyBaseUrl));

        config.base_url = "ftp://sim".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedScheme(_))
        ));

        config.base_url = "http://sim".to_string();
        config.refresh_interval = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroRefreshInterval));
    }
}
