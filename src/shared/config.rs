//! Application Configuration
//!
//! Loaded from `appdeck.toml`. Every field is optional in the file; missing
//! fields take their defaults and a missing file means all defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::services::sync_engine::DEFAULT_ICON_CONCURRENCY;
use crate::domain::value_objects::SortCriterion;

/// Config file name looked up in the standard locations
pub const CONFIG_FILE_NAME: &str = "appdeck.toml";

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the catalog snapshot, wallpaper and backend registry
    pub data_dir: Option<PathBuf>,
    /// Backend registry file (defaults to `<data_dir>/apps.txt`)
    pub registry_path: Option<PathBuf>,
    /// Icon fetches in flight while rebuilding the catalog
    pub icon_fetch_concurrency: usize,
    /// Upper bound for any single backend call, in milliseconds
    pub gateway_timeout_ms: u64,
    /// Ordering used when none is requested
    pub default_sort: SortCriterion,
    /// Log level filter (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log to this file instead of stderr
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            registry_path: None,
            icon_fetch_concurrency: DEFAULT_ICON_CONCURRENCY,
            gateway_timeout_ms: 30_000,
            default_sort: SortCriterion::NameAsc,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Find appdeck.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: user config dir, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("appdeck").join(CONFIG_FILE_NAME)),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME))),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];

        candidates.into_iter().flatten().find(|c| c.exists())
    }

    /// Load configuration from the standard locations, defaults if none exists
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("appdeck")))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Resolved backend registry path
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(|| self.data_dir().join("apps.txt"))
    }

    /// Backend call timeout
    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_millis(self.gateway_timeout_ms.max(1))
    }
}

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file_overrides_fields() {
        let config = Config::parse(
            r#"
            data_dir = "/tmp/appdeck-data"
            icon_fetch_concurrency = 8
            default_sort = "latest-used"
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir(), PathBuf::from("/tmp/appdeck-data"));
        assert_eq!(config.registry_path(), PathBuf::from("/tmp/appdeck-data/apps.txt"));
        assert_eq!(config.icon_fetch_concurrency, 8);
        assert_eq!(config.default_sort, SortCriterion::MostRecentlyUsed);
        assert_eq!(config.gateway_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_bad_sort_key_is_a_parse_error() {
        let err = Config::parse(r#"default_sort = "newest""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "gateway_timeout_ms = 250\nlog_level = \"debug\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.gateway_timeout(), Duration::from_millis(250));
        assert_eq!(config.log_level, "debug");

        assert!(matches!(
            Config::load_from_path(&dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
