//! Recording collaborators for driving the sequencer without a machine

use fiveaxis_calibration::{Collaborators, FiveAxisCalibration};
use fiveaxis_core::{
    CalibrationParameters, CommandEmitter, Message, MessageLevel, MotionError, MotionIssuer,
    Point3, PositionReader, Reporter, Result,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

pub const FAST_FEEDRATE: f64 = 3000.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    WaitForIdle,
    SetCompensation(bool),
    Home,
    Move {
        target: Point3,
        feedrate: f64,
        relative: bool,
    },
    Emit(String),
    Report(MessageLevel, String),
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

struct FakeMotion {
    log: CallLog,
}

impl MotionIssuer for FakeMotion {
    fn wait_for_idle(&mut self) -> Result<()> {
        self.log.lock().push(Call::WaitForIdle);
        Ok(())
    }

    fn set_compensation(&mut self, enabled: bool) -> Result<()> {
        self.log.lock().push(Call::SetCompensation(enabled));
        Ok(())
    }

    fn home(&mut self) -> Result<()> {
        self.log.lock().push(Call::Home);
        Ok(())
    }

    fn coordinated_move(&mut self, target: Point3, feedrate: f64, relative: bool) -> Result<()> {
        self.log.lock().push(Call::Move {
            target,
            feedrate,
            relative,
        });
        Ok(())
    }

    fn fast_feedrate(&self) -> f64 {
        FAST_FEEDRATE
    }
}

/// Answers position queries from a queue, failing once it runs dry
struct FakePosition {
    positions: Arc<Mutex<VecDeque<Point3>>>,
}

impl PositionReader for FakePosition {
    fn axis_position(&self) -> Result<Point3> {
        self.positions.lock().pop_front().ok_or_else(|| {
            MotionError::PositionUnavailable {
                reason: "no position queued".to_string(),
            }
            .into()
        })
    }
}

struct FakeEmitter {
    log: CallLog,
}

impl CommandEmitter for FakeEmitter {
    fn emit(&mut self, command: &str) -> Result<()> {
        self.log.lock().push(Call::Emit(command.to_string()));
        Ok(())
    }
}

struct FakeReporter {
    log: CallLog,
}

impl Reporter for FakeReporter {
    fn report(&mut self, message: Message) {
        self.log.lock().push(Call::Report(message.level, message.text));
    }
}

pub struct Harness {
    pub calibration: FiveAxisCalibration,
    log: CallLog,
    positions: Arc<Mutex<VecDeque<Point3>>>,
}

impl Harness {
    pub fn new(params: CalibrationParameters) -> Self {
        let log = CallLog::default();
        let positions = Arc::new(Mutex::new(VecDeque::new()));
        let collaborators = Collaborators {
            motion: Box::new(FakeMotion { log: log.clone() }),
            position: Box::new(FakePosition {
                positions: positions.clone(),
            }),
            emitter: Box::new(FakeEmitter { log: log.clone() }),
            reporter: Box::new(FakeReporter { log: log.clone() }),
        };
        Self {
            calibration: FiveAxisCalibration::new(params, collaborators),
            log,
            positions,
        }
    }

    pub fn queue_position(&self, x: f64, y: f64, z: f64) {
        self.positions.lock().push_back(Point3::new(x, y, z));
    }

    /// Everything except progress text
    pub fn machine_calls(&self) -> Vec<Call> {
        self.log
            .lock()
            .iter()
            .filter(|call| !matches!(call, Call::Report(..)))
            .cloned()
            .collect()
    }

    pub fn emitted(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Emit(command) => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn reports(&self, level: MessageLevel) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Report(l, text) if *l == level => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }
}
