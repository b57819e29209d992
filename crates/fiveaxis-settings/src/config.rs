//! Configuration for FiveAxis calibration
//!
//! Provides configuration file handling, defaults and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into two sections:
//! - `[five_axis]`: probe point strings and fixture geometry
//! - `[machine]`: motion settings used by the simulated machine

use crate::error::{ConfigError, SettingsError, SettingsResult};
use fiveaxis_core::{AngleUnit, CalibrationParameters, PROBE_POINT_COUNT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Probe point strings and fixture geometry
///
/// Point strings are kept verbatim; they are parsed into coordinates by the
/// probe point store when the calibration session is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiveAxisSettings {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point1: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point2: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point3: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point4: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point5: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point6: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point7: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point8: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point9: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub point10: String,
    /// Long arm of the B-axis probe fixture
    pub big_part_length: f64,
    /// Short arm of the B-axis probe fixture
    pub small_part_length: f64,
    /// Home all axes before moving to the first point
    pub home_first: bool,
    /// Relative Z lift after the A-axis probe
    pub lift_height: f64,
    /// Unit written into synthesized rotary commands
    pub angle_unit: AngleUnit,
}

impl Default for FiveAxisSettings {
    fn default() -> Self {
        let params = CalibrationParameters::default();
        Self {
            point1: String::new(),
            point2: String::new(),
            point3: String::new(),
            point4: String::new(),
            point5: String::new(),
            point6: String::new(),
            point7: String::new(),
            point8: String::new(),
            point9: String::new(),
            point10: String::new(),
            big_part_length: params.big_part_length,
            small_part_length: params.small_part_length,
            home_first: params.home_first,
            lift_height: params.lift_height,
            angle_unit: params.angle_unit,
        }
    }
}

impl FiveAxisSettings {
    /// The ten point strings in slot order, empty when not configured
    pub fn point_strings(&self) -> [&str; PROBE_POINT_COUNT] {
        [
            &self.point1,
            &self.point2,
            &self.point3,
            &self.point4,
            &self.point5,
            &self.point6,
            &self.point7,
            &self.point8,
            &self.point9,
            &self.point10,
        ]
    }

    /// Fixture geometry and run options for the sequencer
    pub fn calibration_parameters(&self) -> CalibrationParameters {
        CalibrationParameters {
            big_part_length: self.big_part_length,
            small_part_length: self.small_part_length,
            home_first: self.home_first,
            lift_height: self.lift_height,
            angle_unit: self.angle_unit,
        }
    }
}

/// Motion settings for the simulated machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Positioning feedrate in mm/min
    pub fast_feedrate: f64,
    /// Position the machine reports after homing
    pub home_position: [f64; 3],
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            fast_feedrate: 3000.0,
            home_position: [0.0, 0.0, 0.0],
        }
    }
}

/// Complete calibration configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Probe points and fixture geometry
    pub five_axis: FiveAxisSettings,
    /// Machine motion settings
    pub machine: MachineSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/fiveaxis/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("fiveaxis").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded calibration config from {}", path.display());
        Ok(config)
    }

    /// Load the given file, or the default file when present, or defaults
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Ok(default) if default.exists() => Self::load_from_file(&default),
            Ok(default) => {
                tracing::info!(
                    "No config at {}, using built-in defaults",
                    default.display()
                );
                Ok(Self::default())
            }
            Err(e) => {
                tracing::warn!("{}, using built-in defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let five_axis = &self.five_axis;

        require_finite("five_axis.big_part_length", five_axis.big_part_length)?;
        require_finite("five_axis.small_part_length", five_axis.small_part_length)?;
        if five_axis.big_part_length + five_axis.small_part_length <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "five_axis.big_part_length + five_axis.small_part_length".to_string(),
                value: format!(
                    "{}",
                    five_axis.big_part_length + five_axis.small_part_length
                ),
            }
            .into());
        }

        require_finite("five_axis.lift_height", five_axis.lift_height)?;
        if five_axis.lift_height < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "five_axis.lift_height".to_string(),
                value: five_axis.lift_height.to_string(),
            }
            .into());
        }

        require_finite("machine.fast_feedrate", self.machine.fast_feedrate)?;
        if self.machine.fast_feedrate <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "machine.fast_feedrate".to_string(),
                reason: "must be > 0".to_string(),
            });
        }

        for (axis, value) in ["x", "y", "z"].iter().zip(self.machine.home_position) {
            require_finite(&format!("machine.home_position.{}", axis), value)?;
        }

        Ok(())
    }
}

fn require_finite(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::InvalidSetting {
            key: key.to_string(),
            reason: "must be finite".to_string(),
        })
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}
