//! Simulated five-axis machine
//!
//! Stands in for the motion planner, position source and command pipeline of
//! a real controller. Every move completes instantly: the achieved position
//! is the commanded target, with NaN components keeping their axis.

use fiveaxis_calibration::Collaborators;
use fiveaxis_core::{CommandEmitter, MotionIssuer, Point3, PositionReader, Reporter, Result};
use fiveaxis_settings::MachineSettings;
use parking_lot::RwLock;
use std::sync::Arc;

/// Simulated machine state
#[derive(Debug, Clone)]
pub struct MachineState {
    /// Current linear position
    pub position: Point3,
    /// Position reached by the homing cycle
    pub home_position: Point3,
    /// Whether the homing cycle has run
    pub homed: bool,
    /// Whether position compensation is active
    pub compensation: bool,
    /// Commands injected by the calibration, in order
    pub emitted: Vec<String>,
}

impl MachineState {
    fn new(settings: &MachineSettings) -> Self {
        let [x, y, z] = settings.home_position;
        let home_position = Point3::new(x, y, z);
        Self {
            position: home_position,
            home_position,
            homed: false,
            compensation: true,
            emitted: Vec::new(),
        }
    }
}

/// Cheaply cloneable handle to one simulated machine
#[derive(Debug, Clone)]
pub struct SimulatedMachine {
    state: Arc<RwLock<MachineState>>,
    fast_feedrate: f64,
}

impl SimulatedMachine {
    /// Create a machine resting at its home position
    pub fn new(settings: &MachineSettings) -> Self {
        Self {
            state: Arc::new(RwLock::new(MachineState::new(settings))),
            fast_feedrate: settings.fast_feedrate,
        }
    }

    /// Hand this machine to a calibration sequencer
    pub fn collaborators(&self, reporter: Box<dyn Reporter>) -> Collaborators {
        Collaborators {
            motion: Box::new(self.clone()),
            position: Box::new(self.clone()),
            emitter: Box::new(self.clone()),
            reporter,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> MachineState {
        self.state.read().clone()
    }

    /// Commands injected so far
    pub fn emitted(&self) -> Vec<String> {
        self.state.read().emitted.clone()
    }
}

impl MotionIssuer for SimulatedMachine {
    fn wait_for_idle(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_compensation(&mut self, enabled: bool) -> Result<()> {
        self.state.write().compensation = enabled;
        tracing::debug!(
            "Compensation {}",
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    fn home(&mut self) -> Result<()> {
        let mut state = self.state.write();
        state.position = state.home_position;
        state.homed = true;
        tracing::info!("Homed to {}", state.position);
        Ok(())
    }

    fn coordinated_move(&mut self, target: Point3, feedrate: f64, relative: bool) -> Result<()> {
        let mut state = self.state.write();
        state.position = if relative {
            state.position.offset_by(&target)
        } else {
            target.resolve_against(&state.position)
        };
        tracing::debug!(
            "Moved to {} at F{:.0}{}",
            state.position,
            feedrate,
            if relative { " (relative)" } else { "" }
        );
        Ok(())
    }

    fn fast_feedrate(&self) -> f64 {
        self.fast_feedrate
    }
}

impl PositionReader for SimulatedMachine {
    fn axis_position(&self) -> Result<Point3> {
        Ok(self.state.read().position)
    }
}

impl CommandEmitter for SimulatedMachine {
    fn emit(&mut self, command: &str) -> Result<()> {
        tracing::info!("Injected command: {}", command);
        self.state.write().emitted.push(command.to_string());
        Ok(())
    }
}
