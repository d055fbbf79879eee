//! Configuration file support for collection-search.
//!
//! This module writes the effective configuration back out as TOML, used by
//! `init-config`. Runtime loading with environment overrides goes through
//! [`load_config`](super::load_config).
//!
//! # Configuration File Format
//!
//! ```toml
//! [data]
//! path = "data.json"
//!
//! [engine]
//! page_size = 48
//! window_width = 5
//! leaderboard_size = 100
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{Config, DataConfig, EngineConfig, LoggingConfig};

/// Configuration file structure
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Data section
    #[serde(default)]
    pub data: DataConfig,

    /// Engine section
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging section
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigFile {
    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }

        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

impl From<Config> for ConfigFile {
    fn from(config: Config) -> Self {
        Self {
            data: config.data,
            engine: config.engine,
            logging: config.logging,
        }
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_config_file_from_config() {
        let mut config = Config::default();
        config.data.path = PathBuf::from("/tmp/holdings.json");
        config.engine.leaderboard_size = 50;

        let file = ConfigFile::from(config);
        assert_eq!(file.data.path, PathBuf::from("/tmp/holdings.json"));
        assert_eq!(file.engine.leaderboard_size, 50);
        assert_eq!(file.engine.page_size, 48);
    }

    #[test]
    fn test_config_file_save_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ConfigFile::default();
        config.engine.page_size = 12;
        config.logging.level = "warn".to_string();

        config.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: ConfigFile = toml::from_str(&content).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_saved_file_loads_as_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("collection-search.toml");

        let mut config = Config::default();
        config.engine.window_width = 7;
        config.logging.level = "debug".to_string();
        ConfigFile::from(config).save(&path).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.engine.window_width, 7);
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn test_config_file_save_to_directory_fails() {
        let dir = tempdir().unwrap();
        let result = ConfigFile::default().save(dir.path());
        assert!(matches!(result, Err(ConfigFileError::Io(_))));
    }
}
