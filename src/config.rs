//! Settings - TOML Configuration
//!
//! Data source defaults and logging options, loaded from a TOML file in the
//! platform config directory. A missing file yields the defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{DEFAULT_PAGE_SIZE, QueryParams};
use crate::error::Result;
use crate::logging::LogConfig;

/// File name of the settings file inside the config directory
pub const SETTINGS_FILE: &str = "datasource.toml";

/// Data source defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    /// Whether the filtered view applies the filter text locally
    pub local_filter: bool,
    /// Rows per page for paginated sources
    pub page_size: usize,
    /// Base parameters sent with every retrieval
    pub params: QueryParams,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            local_filter: true,
            page_size: DEFAULT_PAGE_SIZE,
            params: QueryParams::new(),
        }
    }
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_source: DataSourceConfig,
    pub log: LogConfig,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Default settings path, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "goldwind", "dfc-datasource")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings from `path`; a missing file gives the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Settings file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save settings to `path`, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_settings() {
        let settings = Settings::from_toml_str(
            r#"
            [data_source]
            local_filter = false
            page_size = 25

            [data_source.params]
            ordering = "-created"
            site = 7

            [log]
            level = "debug"
            "#,
        )
        .expect("parse");

        assert!(!settings.data_source.local_filter);
        assert_eq!(settings.data_source.page_size, 25);
        assert_eq!(settings.data_source.params["ordering"], json!("-created"));
        assert_eq!(settings.data_source.params["site"], json!(7));
        assert_eq!(settings.log.level, "debug");
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = Settings::from_toml_str("").expect("parse");
        assert_eq!(settings, Settings::default());
        assert!(settings.data_source.local_filter);
        assert_eq!(settings.data_source.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = Settings::from_toml_str("[data_source\nlocal_filter = ");
        assert!(matches!(result, Err(crate::error::Error::TomlDe { .. })));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("dfc-datasource-test-{}", std::process::id()));
        let path = dir.join(SETTINGS_FILE);

        let mut settings = Settings::default();
        settings.data_source.page_size = 10;
        settings.data_source.params.insert("site".into(), json!("north"));
        settings.save(&path).expect("save");

        let loaded = Settings::load(&path).expect("load");
        assert_eq!(loaded, settings);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let loaded = Settings::load("/nonexistent/dfc-datasource/settings.toml").expect("load");
        assert_eq!(loaded, Settings::default());
    }
}
