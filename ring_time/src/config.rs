//! Settings persistence utilities
//!
//! Stores a host application's settings as TOML under the platform config
//! directory. Intervals are never persisted here.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Error type for settings operations
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Base directory shared by every picker application
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "ring-time", "pickers").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Settings file of one application
pub fn config_path(app_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", app_name)))
}

/// Load an application's settings.
///
/// Returns `None` if nothing was saved yet and an error if the file exists
/// but can't be parsed.
pub fn load_config<T: DeserializeOwned>(app_name: &str) -> Result<Option<T>, ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    Ok(Some(toml::from_str(&contents)?))
}

/// Save an application's settings
pub fn save_config<T: Serialize>(app_name: &str, config: &T) -> Result<(), ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(&path, contents)?;
    log::debug!("saved settings to {}", path.display());
    Ok(())
}

/// Delete an application's settings
pub fn delete_config(app_name: &str) -> Result<(), ConfigError> {
    let path = config_path(app_name).ok_or(ConfigError::NoConfigDir)?;

    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}
