//! FiveAxis Settings Crate
//!
//! Handles calibration configuration: file loading, defaults and validation.

pub mod config;
pub mod error;

pub use config::{Config, FiveAxisSettings, MachineSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
