//! Configuration errors
//!
//! [`SettingsError`] covers reading, writing and validating the calibration
//! config file. [`ConfigError`] is the narrower set raised while checking
//! values and file formats.

use std::io;
use thiserror::Error;

/// Failure while loading, saving or validating the calibration config
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Config file could not be read
    #[error("Cannot load calibration config {0}")]
    LoadError(String),

    /// Config file could not be written
    #[error("Cannot save calibration config {0}")]
    SaveError(String),

    /// Value present but unusable
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// No platform config directory
    #[error("Config directory unavailable: {0}")]
    ConfigDirectory(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Malformed or unserializable JSON
    #[error("Bad JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed TOML
    #[error("Bad TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Cannot write TOML config: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Format and range problems found while checking a config
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Extension other than `.toml` or `.json`
    #[error("Unsupported config format '{0}', expected toml or json")]
    UnsupportedFormat(String),

    /// Numeric value outside its accepted range
    #[error("{key} = {value} is out of range")]
    ValueOutOfRange { key: String, value: String },
}

/// Result alias for config operations
pub type SettingsResult<T> = Result<T, SettingsError>;
