//! # FiveAxis Calibration
//!
//! Guided self-calibration of the rotary axes of a five-axis machine.
//!
//! The operator defines up to ten probe points, then triggers the run one
//! step at a time. Each step records where the machine actually arrived,
//! derives the A, C and B axis offsets from the recorded positions and
//! injects the corrections as machine commands.
//!
//! ## Modules
//!
//! - [`parser`]: coordinate string parsing
//! - [`points`]: probe point storage
//! - [`geometry`]: offset and rotation centre derivation
//! - [`command_creator`]: correction command text
//! - [`sequencer`]: the step state machine
//! - [`commands`]: console command parsing and dispatch

pub mod command_creator;
pub mod commands;
pub mod geometry;
pub mod parser;
pub mod points;
pub mod sequencer;

pub use command_creator::CommandText;
pub use commands::CalibrationCommand;
pub use geometry::RotationCenter;
pub use parser::parse_xyz;
pub use points::{ActualProbePoints, ProbePointStore};
pub use sequencer::{CalibrationReport, CalibrationStep, Collaborators, FiveAxisCalibration};
