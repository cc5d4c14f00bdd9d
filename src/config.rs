//! Optional user configuration, read from `<config_dir>/acctdesk/config.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::routes::RouteTable;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform does not provide a config directory.
    #[error("could not determine XDG config directory")]
    NoConfigDir,
}

/// Runtime settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides the data directory holding the account and preferences.
    pub data_dir: Option<PathBuf>,
    /// How long a success acknowledgment stays visible, in milliseconds.
    pub success_ack_ms: u64,
    /// Event poll interval, in milliseconds.
    pub tick_ms: u64,
    /// Route name → path overrides merged over the defaults.
    pub routes: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            success_ack_ms: 2000,
            tick_ms: 100,
            routes: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Loads `<config_dir>/acctdesk/config.json`, or defaults if it is absent.
    pub fn load() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&dir.join("acctdesk").join("config.json"))
    }

    /// Loads from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn success_ack(&self) -> Duration {
        Duration::from_millis(self.success_ack_ms)
    }

    /// Poll interval, never below 10ms.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }

    /// Default routes with this config's overrides applied.
    pub fn route_table(&self) -> RouteTable {
        RouteTable::default().with_overrides(&self.routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.success_ack(), Duration::from_millis(2000));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"success_ack_ms": 500}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.success_ack_ms, 500);
        assert_eq!(config.tick_ms, 100);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn route_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"routes": {"dashboard": "/home"}}"#).unwrap();
        let routes = Config::load_from(&path).unwrap().route_table();
        assert_eq!(routes.resolve("dashboard"), Ok("/home"));
        assert_eq!(routes.resolve("profile.update"), Ok("/settings/profile"));
    }

    #[test]
    fn invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn tick_has_floor() {
        let config = Config {
            tick_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.tick(), Duration::from_millis(10));
    }
}
