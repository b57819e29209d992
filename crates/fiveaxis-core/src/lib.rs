//! # FiveAxis Core
//!
//! Core types, traits, and utilities for five-axis calibration.
//! Provides the shared data model, the collaborator traits the calibration
//! sequencer drives, messages, events and the error taxonomy.

pub mod core;
pub mod data;
pub mod error;

pub use core::{
    event::{CalibrationEvent, EventDispatcher},
    message::{Message, MessageLevel, TracingReporter},
    CommandEmitter, MotionIssuer, PositionReader, Reporter,
};

pub use data::{AngleUnit, Axis, CalibrationParameters, Point3, PROBE_POINT_COUNT};

pub use error::{CalibrationError, Error, MotionError, Result};
