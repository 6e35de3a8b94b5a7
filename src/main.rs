// src/main.rs

use clap::{CommandFactory, Parser};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use attitude_csv_render::batch::{run_batch, BatchOutcome};
use attitude_csv_render::config::AnalysisConfig;
use attitude_csv_render::crate_version;
use attitude_csv_render::logger::init_logger;
use attitude_csv_render::orchestrator::{analyze_source, RenderSink};
use attitude_csv_render::sinks::{ConsoleReportSink, EpisodeCsvSink, OutputLocation, PlotSink};

/// Segment attitude telemetry into episodes and plot roll/pitch over time.
#[derive(Parser, Debug)]
#[command(name = "attitude_csv_render", version = crate_version(), about)]
struct Cli {
    /// Analyze a single telemetry CSV file
    #[arg(long, conflicts_with = "dir")]
    file: Option<PathBuf>,

    /// Analyze every matching file in this directory
    #[arg(long)]
    dir: Option<PathBuf>,

    /// File name pattern used with --dir
    #[arg(long)]
    pattern: Option<String>,

    /// Output directory for plots and exports (default: <source dir>/analysis)
    #[arg(long)]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Time step in seconds above which a new episode starts
    #[arg(long)]
    gap_threshold: Option<f64>,

    /// Also start a new episode when time runs backwards
    #[arg(long)]
    detect_time_reversal: bool,

    /// Also render the radian attitude plot
    #[arg(long)]
    radians: bool,

    /// Print statistics for each episode
    #[arg(long)]
    per_episode: bool,

    /// Write per-episode statistics to episodes_<name>.csv
    #[arg(long)]
    export_episodes: bool,

    /// Skip PNG rendering
    #[arg(long)]
    no_plots: bool,
}

fn build_config(cli: &Cli) -> Result<AnalysisConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            AnalysisConfig::load_from_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(threshold) = cli.gap_threshold {
        config.segmentation.gap_threshold_s = threshold;
    }
    if cli.detect_time_reversal {
        config.segmentation.detect_time_reversal = true;
    }
    if let Some(pattern) = &cli.pattern {
        config.batch.pattern = pattern.clone();
    }
    config.validate()?;
    Ok(config)
}

fn build_sinks(cli: &Cli, config: &AnalysisConfig) -> Vec<Box<dyn RenderSink>> {
    let output = match &cli.output {
        Some(dir) => OutputLocation::Fixed(dir.clone()),
        None => OutputLocation::BesideSource,
    };

    let mut sinks: Vec<Box<dyn RenderSink>> =
        vec![Box::new(ConsoleReportSink { per_episode: cli.per_episode })];
    if !cli.no_plots {
        sinks.push(Box::new(PlotSink {
            output: output.clone(),
            settings: config.plot.clone(),
            include_radians: cli.radians,
        }));
    }
    if cli.export_episodes {
        sinks.push(Box::new(EpisodeCsvSink { output }));
    }
    sinks
}

/// Process exit status for a finished batch: 2 when nothing matched, 1 when
/// any source failed, 0 otherwise.
fn batch_exit_status(outcome: &BatchOutcome) -> u8 {
    match outcome {
        BatchOutcome::NoSourcesFound { .. } => 2,
        BatchOutcome::Processed(_) => {
            let failures = outcome.failure_count();
            if failures > 0 {
                error!("{failures} file(s) failed to analyze");
                1
            } else {
                0
            }
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn Error>> {
    let config = build_config(cli)?;
    let mut sinks = build_sinks(cli, &config);

    if let Some(file) = &cli.file {
        analyze_source(file, &config, &mut sinks)?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(dir) = &cli.dir else {
        eprintln!("Error: either --file or --dir must be given.\n");
        Cli::command().print_help()?;
        return Ok(ExitCode::from(1));
    };

    let outcome = run_batch(dir, &config.batch.pattern, &config, &mut sinks)?;
    Ok(ExitCode::from(batch_exit_status(&outcome)))
}

fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
