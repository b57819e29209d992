//! Five-axis calibration sequencer
//!
//! A run is a fixed sequence of steps. Each step reads the positions recorded
//! by earlier steps, performs one computation or one motion dispatch, and
//! returns without waiting for the motion to finish. Step 0 is the only one
//! that waits, for the motion queue to drain before the run begins.
//!
//! Callers must only advance once the previous motion has settled. Running
//! steps out of order is not detected; it produces meaningless offsets, never
//! a panic.

use crate::command_creator::{self, CommandText, RETURN_A_TO_ZERO};
use crate::geometry::{self, RotationCenter};
use crate::points::{ActualProbePoints, ProbePointStore};
use fiveaxis_core::{
    Axis, CalibrationError, CalibrationEvent, CalibrationParameters, CommandEmitter,
    EventDispatcher, MotionIssuer, Point3, PositionReader, Reporter, Result,
};
use std::fmt;

/// Calibration step cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CalibrationStep {
    /// Wait for idle, drop compensation, optionally home, go to point 1
    Start,
    /// Record point 1, go to point 2
    AfterPoint1,
    /// Record point 2, derive and apply the A-axis offset, lift, return A
    AfterAAxis,
    /// Derive and apply the C-axis offset, go to point 3
    AfterCAxis,
    /// Record point 3, go to point 4
    AfterPreLinear,
    /// Record point 4, derive the B-axis correction and rotation centre
    BAxisCorrection,
}

impl CalibrationStep {
    /// Every step in run order
    pub const ALL: [CalibrationStep; 6] = [
        Self::Start,
        Self::AfterPoint1,
        Self::AfterAAxis,
        Self::AfterCAxis,
        Self::AfterPreLinear,
        Self::BAxisCorrection,
    ];

    /// Step number as used by the step-trigger command
    pub fn number(&self) -> u8 {
        match self {
            Self::Start => 0,
            Self::AfterPoint1 => 1,
            Self::AfterAAxis => 2,
            Self::AfterCAxis => 3,
            Self::AfterPreLinear => 4,
            Self::BAxisCorrection => 5,
        }
    }

    /// Step that follows this one, `None` after the last
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(usize::from(self.number()) + 1).copied()
    }
}

impl TryFrom<u8> for CalibrationStep {
    type Error = CalibrationError;

    fn try_from(step: u8) -> std::result::Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(step))
            .copied()
            .ok_or(CalibrationError::UnknownStep { step })
    }
}

impl fmt::Display for CalibrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::AfterPoint1 => "probe point 1",
            Self::AfterAAxis => "A axis",
            Self::AfterCAxis => "C axis",
            Self::AfterPreLinear => "pre-linear",
            Self::BAxisCorrection => "B axis",
        };
        write!(f, "{} ({})", self.number(), name)
    }
}

/// Corrections derived during the current run
///
/// Only finite results are kept; a correction that could not be derived
/// stays `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CalibrationReport {
    /// A-axis tilt offset in radians
    pub a_offset: Option<f64>,
    /// C-axis yaw offset in radians
    pub c_offset: Option<f64>,
    /// B-axis pitch correction in radians
    pub b_correction: Option<f64>,
    /// Straight-line estimate of the B rotation centre
    pub rotation_center_estimate: Option<RotationCenter>,
    /// Equal-radius refinement of the B rotation centre
    pub rotation_center: Option<RotationCenter>,
}

/// Machine-side capabilities handed to the sequencer
pub struct Collaborators {
    /// Planner: idle wait, homing, moves, compensation
    pub motion: Box<dyn MotionIssuer>,
    /// Achieved position queries
    pub position: Box<dyn PositionReader>,
    /// Command injection
    pub emitter: Box<dyn CommandEmitter>,
    /// Progress text sink
    pub reporter: Box<dyn Reporter>,
}

/// Five-axis self-calibration state machine
pub struct FiveAxisCalibration {
    params: CalibrationParameters,
    probe_points: ProbePointStore,
    actual: ActualProbePoints,
    report: CalibrationReport,
    next_step: Option<CalibrationStep>,
    motion: Box<dyn MotionIssuer>,
    position: Box<dyn PositionReader>,
    emitter: Box<dyn CommandEmitter>,
    pub(crate) reporter: Box<dyn Reporter>,
    events: Option<EventDispatcher>,
}

impl FiveAxisCalibration {
    /// Create a sequencer with unset probe points
    pub fn new(params: CalibrationParameters, collaborators: Collaborators) -> Self {
        Self {
            params,
            probe_points: ProbePointStore::new(),
            actual: ActualProbePoints::new(),
            report: CalibrationReport::default(),
            next_step: Some(CalibrationStep::Start),
            motion: collaborators.motion,
            position: collaborators.position,
            emitter: collaborators.emitter,
            reporter: collaborators.reporter,
            events: None,
        }
    }

    /// Publish progress events on `dispatcher`
    pub fn with_events(mut self, dispatcher: EventDispatcher) -> Self {
        self.events = Some(dispatcher);
        self
    }

    /// Parse configured point strings into the probe point store
    pub fn load_points_from_config<'a, I>(&mut self, strings: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.probe_points.load_from_config(strings);
    }

    /// Fixture geometry and run options
    pub fn parameters(&self) -> &CalibrationParameters {
        &self.params
    }

    /// Operator-defined targets
    pub fn probe_points(&self) -> &ProbePointStore {
        &self.probe_points
    }

    /// Mutable access to the targets
    pub fn probe_points_mut(&mut self) -> &mut ProbePointStore {
        &mut self.probe_points
    }

    /// Positions recorded so far in this run
    pub fn actual_points(&self) -> &ActualProbePoints {
        &self.actual
    }

    /// Corrections derived so far in this run
    pub fn report(&self) -> &CalibrationReport {
        &self.report
    }

    /// Step `advance` would run next, `None` once the run is complete
    pub fn next_step(&self) -> Option<CalibrationStep> {
        self.next_step
    }

    /// Run the step after the last one executed
    ///
    /// Returns the step that ran, or `None` when the run is already complete.
    pub fn advance(&mut self) -> Result<Option<CalibrationStep>> {
        match self.next_step {
            Some(step) => {
                self.run_step(step)?;
                Ok(Some(step))
            }
            None => {
                self.reporter
                    .info("Calibration complete, run step 0 to start again".to_string());
                Ok(None)
            }
        }
    }

    /// Run a step by number. Numbers without a step are ignored.
    pub fn run_step_number(&mut self, step: u8) -> Result<()> {
        match CalibrationStep::try_from(step) {
            Ok(step) => self.run_step(step),
            Err(e) => {
                tracing::debug!("{}, ignoring", e);
                Ok(())
            }
        }
    }

    /// Run one step and move the cursor past it
    pub fn run_step(&mut self, step: CalibrationStep) -> Result<()> {
        tracing::debug!("Running calibration step {}", step);
        self.publish(CalibrationEvent::StepStarted(step.number()));

        match step {
            CalibrationStep::Start => self.start()?,
            CalibrationStep::AfterPoint1 => self.probe_first_point()?,
            CalibrationStep::AfterAAxis => self.set_a_axis_zero()?,
            CalibrationStep::AfterCAxis => self.set_c_axis_regarding_xy()?,
            CalibrationStep::AfterPreLinear => self.pre_linear_correction()?,
            CalibrationStep::BAxisCorrection => self.set_b_axis_correction()?,
        }

        self.next_step = step.next();
        if self.next_step.is_none() {
            self.publish(CalibrationEvent::Completed);
        }
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        self.motion.wait_for_idle()?;
        // Measure raw geometry
        self.motion.set_compensation(false)?;

        self.actual.reset();
        self.report = CalibrationReport::default();

        if self.params.home_first {
            self.motion.home()?;
        }

        self.move_to_point(0)
    }

    fn probe_first_point(&mut self) -> Result<()> {
        self.record_point(0)?;
        self.move_to_point(1)
    }

    fn set_a_axis_zero(&mut self) -> Result<()> {
        self.record_point(1)?;

        let a_offset = geometry::a_axis_offset(&self.actual[0], &self.actual[1], &self.params);
        self.report.a_offset = finite(a_offset);
        self.publish(CalibrationEvent::OffsetComputed {
            axis: Axis::A,
            radians: a_offset,
        });
        if self.emit_correction(command_creator::home_offset, Axis::A, a_offset)? {
            self.reporter
                .info(format!("A axis offset is: {:.3}", a_offset));
        }

        let lift = Point3::from_options(None, None, Some(self.params.lift_height));
        self.issue_move(lift, true)?;
        self.emit(RETURN_A_TO_ZERO)
    }

    fn set_c_axis_regarding_xy(&mut self) -> Result<()> {
        let c_offset = geometry::c_axis_offset(&self.actual[0], &self.actual[1]);
        self.report.c_offset = finite(c_offset);
        self.publish(CalibrationEvent::OffsetComputed {
            axis: Axis::C,
            radians: c_offset,
        });
        if self.emit_correction(command_creator::rapid_move, Axis::C, c_offset)? {
            self.reporter
                .info(format!("C axis offset is: {:.3}", c_offset));
        }

        self.move_to_point(2)
    }

    fn pre_linear_correction(&mut self) -> Result<()> {
        self.record_point(2)?;
        self.move_to_point(3)
    }

    fn set_b_axis_correction(&mut self) -> Result<()> {
        let fourth = self.record_point(3)?;
        let third = self.actual[2];

        let b_correction = geometry::b_axis_correction(&third, &fourth, &self.params);
        self.report.b_correction = finite(b_correction);
        self.publish(CalibrationEvent::OffsetComputed {
            axis: Axis::B,
            radians: b_correction,
        });
        self.reporter
            .info(format!("B axis angle: b{:.3}", b_correction));

        let estimate = geometry::rotation_center_estimate(&third, b_correction, &self.params);
        let refined = geometry::refine_rotation_center(
            &third,
            &fourth,
            estimate,
            self.params.fixture_length(),
        );
        self.report.rotation_center_estimate = estimate.is_finite().then_some(estimate);
        self.report.rotation_center = refined.is_finite().then_some(refined);

        if refined.is_finite() {
            self.reporter.info(format!(
                "Real B axis rotation point: x{:.3} y{:.3} z{:.3} (estimate x{:.3} z{:.3})",
                refined.x, fourth.y, refined.z, estimate.x, estimate.z
            ));
            tracing::info!(
                "B axis rotation centre refined from {} to {}",
                estimate,
                refined
            );
        } else {
            self.reporter
                .warning("B axis rotation point could not be derived".to_string());
        }

        self.emit_correction(command_creator::home_offset, Axis::B, b_correction)?;
        Ok(())
    }

    /// Record the achieved position into actual probe point `index`
    fn record_point(&mut self, index: usize) -> Result<Point3> {
        let position = self.position.axis_position()?;
        self.actual.record(index, position);
        self.reporter
            .info(format!("Probe point {} at: {}", index + 1, position));
        self.publish(CalibrationEvent::PointRecorded { index, position });
        Ok(position)
    }

    fn move_to_point(&mut self, index: usize) -> Result<()> {
        let target = self.probe_points.point(index).unwrap_or(Point3::UNSET);
        self.issue_move(target, false)?;
        self.reporter
            .info(format!("Moving to probe point {}: {}", index + 1, target));
        Ok(())
    }

    fn issue_move(&mut self, target: Point3, relative: bool) -> Result<()> {
        let feedrate = self.motion.fast_feedrate();
        self.motion.coordinated_move(target, feedrate, relative)?;
        self.publish(CalibrationEvent::MoveCommanded {
            target,
            feedrate,
            relative,
        });
        Ok(())
    }

    /// Emit a rotary correction built by `build`, skipping non-finite values.
    /// Returns whether a command was dispatched.
    fn emit_correction<F>(&mut self, build: F, axis: Axis, radians: f64) -> Result<bool>
    where
        F: Fn(Axis, f64) -> std::result::Result<CommandText, CalibrationError>,
    {
        if !radians.is_finite() {
            tracing::warn!("{} axis correction not applicable, skipping", axis);
            self.reporter
                .warning(format!("{} axis correction not applicable, skipped", axis));
            return Ok(false);
        }

        let command = build(axis, self.params.angle_unit.convert(radians))?;
        self.emit(command.as_str())?;
        Ok(true)
    }

    fn emit(&mut self, command: &str) -> Result<()> {
        self.emitter.emit(command)?;
        tracing::debug!("Emitted '{}'", command);
        self.publish(CalibrationEvent::CommandEmitted(command.to_string()));
        Ok(())
    }

    fn publish(&self, event: CalibrationEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
