//! Event system for calibration progress
//!
//! Provides:
//! - Event types emitted while a calibration run advances
//! - Event dispatcher for publishing events to subscribers

use crate::data::{Axis, Point3};
use tokio::sync::broadcast;

/// Calibration event types
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationEvent {
    /// A step began executing
    StepStarted(u8),
    /// An actual probe point was recorded
    PointRecorded {
        /// Slot in the actual probe point table.
        index: usize,
        /// Achieved machine position.
        position: Point3,
    },
    /// A move was handed to the planner
    MoveCommanded {
        /// Target (or offset when relative).
        target: Point3,
        /// Feedrate in mm/min.
        feedrate: f64,
        /// Whether the target is relative.
        relative: bool,
    },
    /// A rotary correction was derived
    OffsetComputed {
        /// Axis the correction applies to.
        axis: Axis,
        /// Correction in radians, NaN when not applicable.
        radians: f64,
    },
    /// A synthesized command was dispatched
    CommandEmitted(String),
    /// The last step of the run finished
    Completed,
}

impl std::fmt::Display for CalibrationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationEvent::StepStarted(step) => write!(f, "Step {} started", step),
            CalibrationEvent::PointRecorded { index, position } => {
                write!(f, "Probe point {} at {}", index + 1, position)
            }
            CalibrationEvent::MoveCommanded {
                target,
                feedrate,
                relative,
            } => {
                let mode = if *relative { "relative" } else { "absolute" };
                write!(f, "Move {} {} F{}", mode, target, feedrate)
            }
            CalibrationEvent::OffsetComputed { axis, radians } => {
                write!(f, "{} axis correction {:.3} rad", axis, radians)
            }
            CalibrationEvent::CommandEmitted(cmd) => write!(f, "Emitted: {}", cmd),
            CalibrationEvent::Completed => write!(f, "Calibration complete"),
        }
    }
}

/// Event dispatcher for publishing events to subscribers
#[derive(Clone)]
pub struct EventDispatcher {
    /// Broadcast sender channel for calibration events.
    tx: broadcast::Sender<CalibrationEvent>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer (default 100)
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Create a new event dispatcher with default buffer size
    pub fn default_with_buffer() -> Self {
        Self::new(100)
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<CalibrationEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers, returning how many received it.
    /// Publishing with no subscribers is not an error.
    pub fn publish(&self, event: CalibrationEvent) -> usize {
        match self.tx.send(event) {
            Ok(count) => count,
            Err(_) => {
                tracing::trace!("calibration event dropped, no subscribers");
                0
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::default_with_buffer()
    }
}
