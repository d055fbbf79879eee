//! Configuration management.

mod file_config;

pub use file_config::{ConfigFile, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_WIDTH};

/// Name of the configuration file looked up by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "collection-search.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "COLLECTION_SEARCH";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data source settings
    #[serde(default)]
    pub data: DataConfig,

    /// Query engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the holdings document lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the JSON document
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.json")
}

/// Paging and leaderboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Records per search page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Page links in the pagination bar
    #[serde(default = "default_window_width")]
    pub window_width: usize,

    /// Entries kept by a leaderboard
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            window_width: default_window_width(),
            leaderboard_size: default_leaderboard_size(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_window_width() -> usize {
    DEFAULT_WINDOW_WIDTH
}

fn default_leaderboard_size() -> usize {
    crate::engine::LEADERBOARD_SIZE
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from an optional file, with `COLLECTION_SEARCH_*` environment overrides
///
/// Nested keys use a double underscore, e.g. `COLLECTION_SEARCH_ENGINE__PAGE_SIZE`.
/// Without a file the overrides apply on top of the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    load_with_env(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(
    path: Option<&Path>,
    env: config::Environment,
) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    builder.add_source(env).build()?.try_deserialize()
}

/// Look for a configuration file in the working directory, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("collection-search").join("config.toml"))
        .filter(|path| path.is_file())
}
