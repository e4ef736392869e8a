//! Logging Setup
//!
//! Installs a tracing subscriber. `RUST_LOG` takes precedence over the
//! configured level; with a log directory set, output goes to a daily rolling
//! file through a non-blocking writer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Logging options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    /// Directory for rolling log files; stdout when unset
    pub directory: Option<PathBuf>,
    /// File name prefix for rolling log files
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "dfc-datasource.log".to_string(),
        }
    }
}

impl LogConfig {
    /// Build the env filter for this config
    pub fn env_filter(&self) -> Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| Error::Invalid {
            message: format!("Invalid log level '{}': {e}", self.level),
        })
    }
}

/// Initialize the global tracing subscriber
///
/// The returned guard must be kept alive for file output to be flushed.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = config.env_filter()?;

    match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| Error::Invalid {
                    message: format!("Failed to install subscriber: {e}"),
                })?;
            tracing::info!("Logging to {}", dir.display());
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .try_init()
                .map_err(|e| Error::Invalid {
                    message: format!("Failed to install subscriber: {e}"),
                })?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rust_log_set() -> bool {
        std::env::var_os("RUST_LOG").is_some()
    }

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.directory, None);
        assert_eq!(config.file_prefix, "dfc-datasource.log");
    }

    #[test]
    fn test_invalid_level_is_error() {
        if rust_log_set() {
            return;
        }
        let config = LogConfig {
            level: "dfc_datasource=loudest".to_string(),
            ..Default::default()
        };
        let err = config.env_filter().expect_err("should fail");
        assert!(matches!(err, Error::Invalid { .. }));
        assert!(err.to_string().contains("dfc_datasource=loudest"));
    }

    #[test]
    fn test_valid_directives_build_filter() {
        if rust_log_set() {
            return;
        }
        let config = LogConfig {
            level: "warn,dfc_datasource=debug".to_string(),
            ..Default::default()
        };
        assert!(config.env_filter().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LogConfig {
            level: "debug".to_string(),
            directory: Some(PathBuf::from("/var/log/dfc")),
            file_prefix: "tables.log".to_string(),
        };
        let text = toml::to_string(&config).expect("serialize");
        let back: LogConfig = toml::from_str(&text).expect("deserialize");
        assert_eq!(back, config);

        let partial: LogConfig = toml::from_str("level = \"trace\"").expect("deserialize");
        assert_eq!(partial.level, "trace");
        assert_eq!(partial.file_prefix, LogConfig::default().file_prefix);
    }
}
