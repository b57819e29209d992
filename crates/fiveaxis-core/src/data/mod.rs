//! Data models for probe points and calibration parameters
//!
//! This module provides:
//! - Axis identifiers for the three linear and three rotary axes
//! - `Point3` machine coordinates with NaN meaning "leave this axis alone"
//! - Angular unit selection for synthesized commands
//! - Fixture geometry and run options (`CalibrationParameters`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of probe point slots (P0-P9)
pub const PROBE_POINT_COUNT: usize = 10;

/// Machine axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// X linear axis
    X,
    /// Y linear axis
    Y,
    /// Z linear axis
    Z,
    /// A rotary axis (tilt about X)
    A,
    /// B rotary axis (tilt about Y)
    B,
    /// C rotary axis (yaw about Z)
    C,
}

impl Axis {
    /// G-code word letter for this axis
    pub fn letter(&self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Linear machine coordinate triple
///
/// A NaN component means "do not change this axis" when the point is used as
/// a move target. A point that was never set is NaN in all three components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Point3 {
    /// Point with every axis unset
    pub const UNSET: Self = Self {
        x: f64::NAN,
        y: f64::NAN,
        z: f64::NAN,
    };

    /// Machine origin
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a point from X, Y, Z coordinates
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a point from optional components, unset ones become NaN
    pub fn from_options(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        Self {
            x: x.unwrap_or(f64::NAN),
            y: y.unwrap_or(f64::NAN),
            z: z.unwrap_or(f64::NAN),
        }
    }

    /// Check whether every component is unset
    pub fn is_unset(&self) -> bool {
        self.x.is_nan() && self.y.is_nan() && self.z.is_nan()
    }

    /// Check whether every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Replace unset components with the matching component of `current`
    pub fn resolve_against(&self, current: &Point3) -> Point3 {
        let pick = |target: f64, now: f64| if target.is_nan() { now } else { target };
        Point3 {
            x: pick(self.x, current.x),
            y: pick(self.y, current.y),
            z: pick(self.z, current.z),
        }
    }

    /// Component-wise sum where NaN offsets leave the axis unchanged
    pub fn offset_by(&self, delta: &Point3) -> Point3 {
        let shift = |base: f64, d: f64| if d.is_nan() { base } else { base + d };
        Point3 {
            x: shift(self.x, delta.x),
            y: shift(self.y, delta.y),
            z: shift(self.z, delta.z),
        }
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::UNSET
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{:.3} y{:.3} z{:.3}", self.x, self.y, self.z)
    }
}

/// Angular unit written into synthesized rotary commands
///
/// Derivation routines always work in radians; this only affects the value
/// placed after the axis letter in emitted commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Radians, as computed
    #[default]
    Radians,
    /// Degrees
    Degrees,
}

impl AngleUnit {
    /// Convert an angle in radians into this unit
    pub fn convert(self, radians: f64) -> f64 {
        match self {
            Self::Radians => radians,
            Self::Degrees => radians.to_degrees(),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radians => write!(f, "rad"),
            Self::Degrees => write!(f, "deg"),
        }
    }
}

/// Fixture geometry and run options, fixed once loaded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationParameters {
    /// Long arm of the B-axis probe fixture
    pub big_part_length: f64,
    /// Short arm of the B-axis probe fixture
    pub small_part_length: f64,
    /// Home all axes before the first move
    pub home_first: bool,
    /// Relative Z lift after the A-axis probe
    pub lift_height: f64,
    /// Unit for angles in synthesized commands
    pub angle_unit: AngleUnit,
}

impl CalibrationParameters {
    /// Total fixture length `big_part_length + small_part_length`
    pub fn fixture_length(&self) -> f64 {
        self.big_part_length + self.small_part_length
    }
}

impl Default for CalibrationParameters {
    fn default() -> Self {
        Self {
            big_part_length: 10.0,
            small_part_length: 10.0,
            home_first: true,
            lift_height: 20.0,
            angle_unit: AngleUnit::Radians,
        }
    }
}
