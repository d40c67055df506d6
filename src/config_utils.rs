//! Configuration file utilities
//!
//! Provides helper functions for locating and reading the app configuration.
//! The config file is stored in the platform-specific config directory
//! under "photo-submitter/".

use crate::error::ConfigError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "photo-submitter";

/// Name of the main config file
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the endpoint address
pub const ENDPOINT_ENV_VAR: &str = "PHOTO_SUBMITTER_ENDPOINT";

/// Settings read from `config.json`. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubmitterConfig {
    pub endpoint_url: Option<String>,
    pub log_level: String,
    pub json_logs: bool,
    pub file_logging: bool,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            log_level: "info".to_string(),
            json_logs: false,
            file_logging: false,
        }
    }
}

impl SubmitterConfig {
    /// Load the config from the default location, falling back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        Ok(load_config_file(CONFIG_FILE_NAME)?.unwrap_or_default())
    }

    /// Load the config from an explicit file, falling back to defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(read_json_file(path)?.unwrap_or_default())
    }

    /// Resolve the endpoint address.
    ///
    /// Priority: explicit value > runtime env var > compile-time env var > config file.
    pub fn resolve_endpoint(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(String::from)
            .or_else(|| env::var(ENDPOINT_ENV_VAR).ok().filter(|v| !v.is_empty()))
            .or_else(|| option_env!("PHOTO_SUBMITTER_ENDPOINT").map(String::from))
            .or_else(|| self.endpoint_url.clone())
    }

    /// Directory for the rolling log file, looked up only when file logging is on
    pub fn file_log_dir(&self) -> Result<Option<PathBuf>, ConfigError> {
        if self.file_logging {
            get_logs_dir().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Get the app's config directory path.
///
/// Returns: `~/.config/photo-submitter` (Linux)
///          `~/Library/Application Support/photo-submitter` (macOS)
///          `C:\Users\<User>\AppData\Roaming\photo-submitter` (Windows)
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::MissingDirectory("config"))?;
    Ok(config_dir.join(APP_DIR_NAME))
}

/// Get the directory where log files and debug reports are written.
///
/// Returns: `~/.photo-submitter/logs`
pub fn get_logs_dir() -> Result<PathBuf, ConfigError> {
    let home_dir = dirs::home_dir()
        .ok_or(ConfigError::MissingDirectory("home"))?;
    Ok(home_dir.join(format!(".{}", APP_DIR_NAME)).join("logs"))
}

/// Get the full path to a config file.
pub fn config_file_path(filename: &str) -> Result<PathBuf, ConfigError> {
    Ok(get_config_dir()?.join(filename))
}

/// Load data from a config file.
///
/// # Returns
/// * `Ok(Some(data))` if file exists and was parsed successfully
/// * `Ok(None)` if file doesn't exist
/// * `Err(...)` if file exists but couldn't be read/parsed
pub fn load_config_file<T: DeserializeOwned>(filename: &str) -> Result<Option<T>, ConfigError> {
    read_json_file(&config_file_path(filename)?)
}

fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let data = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    Ok(Some(data))
}
