// src/orchestrator.rs

use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::axis_names::AttitudeField;
use crate::config::AnalysisConfig;
use crate::data_analysis::attitude_stats::PitchRollStats;
use crate::data_analysis::boundary_agreement::{compare_boundaries, BoundaryAgreement};
use crate::data_analysis::boundary_detection::{
    detect_episode_boundaries, nominal_sample_interval, EpisodeBoundaries,
};
use crate::data_analysis::episode_stats::{summarize_episodes, EpisodeSummary};
use crate::data_analysis::sentinel_filter::{filter_valid_records, reset_positions};
use crate::data_input::telemetry_parser::parse_telemetry_file;
use crate::data_input::telemetry_record::{TelemetryRecord, TelemetryRow};
use crate::error::AnalysisError;

/// Identity of an analyzed telemetry source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetrySource {
    pub path: PathBuf,
    /// File name without extension, used to name output artifacts.
    pub root_name: String,
}

impl TelemetrySource {
    pub fn new(path: &Path) -> Self {
        let root_name = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned();
        Self {
            path: path.to_path_buf(),
            root_name,
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }
}

/// Result bundle of one analysis run. Read-only once built.
#[derive(Debug, Clone)]
pub struct AttitudeAnalysis {
    pub raw_row_count: usize,
    pub reset_count: usize,
    /// Samples left after dropping reset markers, in source order.
    pub records: Vec<TelemetryRecord>,
    pub boundaries: EpisodeBoundaries,
    /// Pooled statistics in degrees.
    pub stats_deg: PitchRollStats,
    /// Pooled statistics in radians.
    pub stats_rad: PitchRollStats,
    pub episodes: Vec<EpisodeSummary>,
    pub agreement: BoundaryAgreement,
    pub sample_interval: Option<f64>,
    pub degrees_derived: bool,
}

impl AttitudeAnalysis {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn episode_count(&self) -> usize {
        self.boundaries.episode_count()
    }

    /// Time of the first record of every episode after the first.
    pub fn boundary_times(&self) -> Vec<f64> {
        self.boundaries
            .indices
            .iter()
            .filter_map(|&i| self.records.get(i).map(|r| r.time))
            .collect()
    }
}

/// Consumer of finished analyses: plots, console reports, file exports.
pub trait RenderSink {
    fn name(&self) -> &str;

    fn render(
        &mut self,
        source: &TelemetrySource,
        analysis: &AttitudeAnalysis,
    ) -> Result<(), AnalysisError>;
}

/// Filter, detect boundaries, aggregate statistics. The three steps always run
/// in this order; an empty filtered sequence fails at the statistics step.
pub fn analyze_rows(
    rows: &[TelemetryRow],
    config: &AnalysisConfig,
) -> Result<AttitudeAnalysis, AnalysisError> {
    let records = filter_valid_records(rows);
    let resets = reset_positions(rows);

    let boundaries = detect_episode_boundaries(&records, &config.segmentation);

    let stats_deg =
        PitchRollStats::compute(&records, AttitudeField::PITCH_DEG, AttitudeField::ROLL_DEG)?;
    let stats_rad = PitchRollStats::compute(&records, AttitudeField::PITCH, AttitudeField::ROLL)?;
    let episodes = summarize_episodes(&records, &boundaries)?;

    let agreement = compare_boundaries(&resets, &boundaries, records.len());
    if !agreement.is_consistent() {
        warn!(
            "Reset markers and time gaps disagree: {} reset-only, {} gap-only boundaries",
            agreement.reset_only.len(),
            agreement.gap_only.len()
        );
    }

    let sample_interval = nominal_sample_interval(&records, &config.segmentation);

    Ok(AttitudeAnalysis {
        raw_row_count: rows.len(),
        reset_count: resets.len(),
        records,
        boundaries,
        stats_deg,
        stats_rad,
        episodes,
        agreement,
        sample_interval,
        degrees_derived: false,
    })
}

/// Loads one telemetry source, analyzes it and hands the result to every sink.
pub fn analyze_source(
    path: &Path,
    config: &AnalysisConfig,
    sinks: &mut [Box<dyn RenderSink>],
) -> Result<AttitudeAnalysis, AnalysisError> {
    let source = TelemetrySource::new(path);
    info!("Loading file: {}", path.display());

    let parsed = parse_telemetry_file(path, &config.input)?;
    let mut analysis = analyze_rows(&parsed.rows, config)?;
    analysis.degrees_derived = parsed.degrees_derived;
    info!(
        "Detected {} episodes in {} valid records",
        analysis.episode_count(),
        analysis.record_count()
    );

    for sink in sinks.iter_mut() {
        debug!("Rendering '{}' with sink '{}'", source.root_name, sink.name());
        sink.render(&source, &analysis)?;
    }
    Ok(analysis)
}
