//! # FiveAxis
//!
//! Geometric self-calibration for five-axis machines.
//!
//! The operator defines up to ten probe points, then steps through a guided
//! run that records where the machine actually arrived, derives the A, C and
//! B rotary axis offsets and injects them as machine commands.
//!
//! ## Architecture
//!
//! FiveAxis is organized as a workspace with multiple crates:
//!
//! 1. **fiveaxis-core** - Data model, collaborator traits, errors, messages, events
//! 2. **fiveaxis-settings** - TOML/JSON configuration
//! 3. **fiveaxis-calibration** - Point parsing, geometry, step sequencer, commands
//! 4. **fiveaxis** - Console binary driving a simulated machine

pub mod simulator;

pub use fiveaxis_calibration::{
    CalibrationCommand, CalibrationReport, CalibrationStep, Collaborators, FiveAxisCalibration,
    RotationCenter,
};
pub use fiveaxis_core::{
    CalibrationError, CalibrationParameters, Error, Message, MessageLevel, Point3, Reporter,
    Result, TracingReporter,
};
pub use fiveaxis_settings::{Config, FiveAxisSettings, MachineSettings, SettingsError};
pub use simulator::SimulatedMachine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Prints calibration progress to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn report(&mut self, message: Message) {
        println!("{}", message);
    }
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout for calibration progress
/// - RUST_LOG environment variable support, `info` when unset
/// - JSON lines instead of pretty output when `json` is set
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
