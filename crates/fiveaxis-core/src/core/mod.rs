//! Collaborator traits for the calibration sequencer
//!
//! The sequencer never reaches for a global machine object. It is handed one
//! implementation of each capability below at construction time:
//! - [`MotionIssuer`]: planner side (idle wait, homing, moves, compensation)
//! - [`PositionReader`]: achieved axis positions
//! - [`CommandEmitter`]: injects synthesized commands back into the system
//! - [`Reporter`]: human-readable progress text

pub mod event;
pub mod message;

use crate::data::Point3;
use crate::error::Result;
use message::Message;

/// Motion planner capabilities used by the calibration steps
pub trait MotionIssuer {
    /// Block until the motion queue has drained
    fn wait_for_idle(&mut self) -> Result<()>;

    /// Enable or disable the active position-compensation transform
    fn set_compensation(&mut self, enabled: bool) -> Result<()>;

    /// Run the homing cycle on all axes
    fn home(&mut self) -> Result<()>;

    /// Queue a coordinated move. NaN components leave their axis untouched.
    /// With `relative` set the target is an offset from the current position.
    fn coordinated_move(&mut self, target: Point3, feedrate: f64, relative: bool) -> Result<()>;

    /// Feedrate used for positioning moves between probe points
    fn fast_feedrate(&self) -> f64;
}

/// Reads the machine's achieved position
pub trait PositionReader {
    /// Current X, Y, Z position in machine coordinates
    fn axis_position(&self) -> Result<Point3>;
}

/// Injects a synthesized command into the surrounding command pipeline
pub trait CommandEmitter {
    /// Dispatch one command line, e.g. `M206 A0.012`
    fn emit(&mut self, command: &str) -> Result<()>;
}

/// Sink for progress text
pub trait Reporter {
    /// Deliver one message
    fn report(&mut self, message: Message);

    /// Deliver an informational message
    fn info(&mut self, text: String) {
        self.report(Message::info(text));
    }

    /// Deliver a warning
    fn warning(&mut self, text: String) {
        self.report(Message::warning(text));
    }

    /// Deliver an error message
    fn error(&mut self, text: String) {
        self.report(Message::error(text));
    }
}
