//! Error handling for FiveAxis
//!
//! Provides error types for the calibration layers:
//! - Calibration errors (probe point indices, synthesized commands)
//! - Motion errors (failures reported by the machine collaborators)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::data::Axis;
use thiserror::Error;

/// Calibration error type
///
/// Raised by the probe point store and the command text builder. None of these
/// are fatal to the surrounding system; the command surface turns them into
/// reported messages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Probe point index outside 0..=9
    #[error("Probe point index {index} out of range: only 9 probe points allowed P0-P9")]
    PointIndexOutOfRange {
        /// The rejected index.
        index: i64,
    },

    /// Step number with no calibration step behind it
    #[error("Unknown calibration step {step}")]
    UnknownStep {
        /// The rejected step number.
        step: u8,
    },

    /// A synthesized command would have carried a NaN or infinite value
    #[error("Refusing to emit non-finite {axis} value {value}")]
    NonFiniteValue {
        /// The axis word the value belonged to.
        axis: Axis,
        /// The offending value.
        value: f64,
    },

    /// A synthesized command did not fit the command buffer
    #[error("Command exceeds {capacity} characters")]
    CommandTooLong {
        /// Capacity of the command buffer.
        capacity: usize,
    },
}

/// Motion error type
///
/// Represents failures reported by the machine-side collaborators:
/// motion planner, homing, position queries and command injection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Motion queue did not drain
    #[error("Motion queue did not become idle: {reason}")]
    NotIdle {
        /// The reason reported by the planner.
        reason: String,
    },

    /// Homing cycle failed
    #[error("Homing failed: {reason}")]
    HomingFailed {
        /// The reason the homing cycle failed.
        reason: String,
    },

    /// Move was rejected by the planner
    #[error("Move rejected: {reason}")]
    MoveRejected {
        /// The reason the move was rejected.
        reason: String,
    },

    /// Current position could not be read
    #[error("Position unavailable: {reason}")]
    PositionUnavailable {
        /// The reason the position could not be read.
        reason: String,
    },

    /// Injected command was rejected
    #[error("Command '{command}' rejected: {reason}")]
    CommandRejected {
        /// The rejected command text.
        command: String,
        /// The reason it was rejected.
        reason: String,
    },
}

/// Main error type for FiveAxis
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Calibration error
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    /// Motion error
    #[error(transparent)]
    Motion(#[from] MotionError),
}

impl Error {
    /// Check if this is a motion error
    pub fn is_motion_error(&self) -> bool {
        matches!(self, Error::Motion(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
