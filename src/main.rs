use anyhow::Context;
use clap::Parser;
use fiveaxis::{
    init_logging, Config, ConsoleReporter, FiveAxisCalibration, Reporter, SimulatedMachine,
    TracingReporter,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// Run a five-axis calibration against a simulated machine
#[derive(Parser, Debug)]
#[command(name = "fiveaxis", version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML or JSON); defaults to the platform config dir
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File of calibration commands, one per line; stdin when omitted
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Emit logs as JSON lines, progress messages included
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.json)?;
    tracing::info!("fiveaxis {} (built {})", fiveaxis::VERSION, fiveaxis::BUILD_DATE);

    let config = Config::load_or_default(args.config.as_deref())
        .context("failed to load configuration")?;

    // JSON output keeps everything in one structured stream
    let reporter: Box<dyn Reporter> = if args.json {
        Box::new(TracingReporter)
    } else {
        Box::new(ConsoleReporter)
    };

    let machine = SimulatedMachine::new(&config.machine);
    let mut calibration = FiveAxisCalibration::new(
        config.five_axis.calibration_parameters(),
        machine.collaborators(reporter),
    );
    calibration.load_points_from_config(config.five_axis.point_strings());

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        match calibration.handle_line(line) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("Not a calibration command: {}", line),
            Err(e) => tracing::error!("'{}' failed: {}", line, e),
        }
    }

    let report = calibration.report();
    tracing::info!(
        "Run finished: A {:?}, C {:?}, B {:?}, centre {:?}",
        report.a_offset,
        report.c_offset,
        report.b_correction,
        report.rotation_center.map(|c| c.to_string()),
    );
    tracing::info!("{} commands injected", machine.emitted().len());

    Ok(())
}
