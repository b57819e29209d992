//! Command Creator
//!
//! Builds the command lines the sequencer injects back into the machine,
//! such as `M206 A0.012` or `G0 C-0.785`. Text lives in a fixed-capacity
//! buffer and every axis value is checked for finiteness before it is
//! written, so a NaN never reaches the machine.

use core::fmt::Write;
use fiveaxis_core::{Axis, CalibrationError};
use heapless::String;

/// Capacity of a synthesized command line in bytes
pub const COMMAND_CAPACITY: usize = 64;

/// Home offset command used for the A and B corrections
pub const SET_HOME_OFFSET: &str = "M206";

/// Rapid move command used for the C correction
pub const RAPID_MOVE: &str = "G0";

/// Rotates the A axis back to zero after the A-axis probe
pub const RETURN_A_TO_ZERO: &str = "G0 A0";

/// A synthesized command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandText {
    text: String<COMMAND_CAPACITY>,
}

impl CommandText {
    /// Start a command with its code, e.g. `M206`
    pub fn new(code: &str) -> Result<Self, CalibrationError> {
        let mut text = String::new();
        text.push_str(code).map_err(|_| CalibrationError::CommandTooLong {
            capacity: COMMAND_CAPACITY,
        })?;
        Ok(Self { text })
    }

    /// Append an axis word with three decimals, e.g. ` A0.012`
    pub fn axis(mut self, axis: Axis, value: f64) -> Result<Self, CalibrationError> {
        if !value.is_finite() {
            return Err(CalibrationError::NonFiniteValue { axis, value });
        }
        write!(self.text, " {}{:.3}", axis.letter(), value).map_err(|_| {
            CalibrationError::CommandTooLong {
                capacity: COMMAND_CAPACITY,
            }
        })?;
        Ok(self)
    }

    /// The command line
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

impl std::fmt::Display for CommandText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `M206 <axis><value>` home offset command
pub fn home_offset(axis: Axis, value: f64) -> Result<CommandText, CalibrationError> {
    CommandText::new(SET_HOME_OFFSET)?.axis(axis, value)
}

/// `G0 <axis><value>` rapid move command
pub fn rapid_move(axis: Axis, value: f64) -> Result<CommandText, CalibrationError> {
    CommandText::new(RAPID_MOVE)?.axis(axis, value)
}
