// src/sinks.rs

use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::axis_names::AngleUnit;
use crate::config::PlotSettings;
use crate::constants::{DEFAULT_OUTPUT_SUBDIR, EPISODES_FILE_PREFIX};
use crate::data_analysis::attitude_stats::AttitudeStats;
use crate::data_analysis::episode_stats::EpisodeSummary;
use crate::error::AnalysisError;
use crate::orchestrator::{AttitudeAnalysis, RenderSink, TelemetrySource};
use crate::plot_functions::plot_attitude_radians::plot_attitude_radians;
use crate::plot_functions::plot_attitude_timeseries::plot_attitude_timeseries;

/// Where artifacts for a source are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLocation {
    /// One directory for every source.
    Fixed(PathBuf),
    /// An `analysis` directory next to each source file.
    BesideSource,
}

impl OutputLocation {
    pub fn resolve(&self, source: &TelemetrySource) -> PathBuf {
        match self {
            OutputLocation::Fixed(dir) => dir.clone(),
            OutputLocation::BesideSource => source
                .path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(DEFAULT_OUTPUT_SUBDIR),
        }
    }

    /// Resolves and creates the output directory.
    pub fn prepare(&self, source: &TelemetrySource) -> Result<PathBuf, AnalysisError> {
        let dir = self.resolve(source);
        fs::create_dir_all(&dir).map_err(|e| AnalysisError::io(&dir, e))?;
        Ok(dir)
    }
}

/// Renders the attitude charts as PNG files.
pub struct PlotSink {
    pub output: OutputLocation,
    pub settings: PlotSettings,
    pub include_radians: bool,
}

impl RenderSink for PlotSink {
    fn name(&self) -> &str {
        "plot"
    }

    fn render(
        &mut self,
        source: &TelemetrySource,
        analysis: &AttitudeAnalysis,
    ) -> Result<(), AnalysisError> {
        let dir = self.output.prepare(source)?;
        let path = plot_attitude_timeseries(analysis, &source.root_name, &dir, &self.settings)
            .map_err(|e| AnalysisError::Render(e.to_string()))?;
        info!("Saved plot to: {}", path.display());

        if self.include_radians {
            let path = plot_attitude_radians(analysis, &source.root_name, &dir, &self.settings)
                .map_err(|e| AnalysisError::Render(e.to_string()))?;
            info!("Saved plot to: {}", path.display());
        }
        Ok(())
    }
}

pub fn format_stats_line(name: &str, stats: &AttitudeStats, unit: AngleUnit) -> String {
    let u = unit.symbol();
    format!(
        "{}: Mean={:.2}{u}, Std Dev={:.2}{u}, Max Abs={:.2}{u}",
        name, stats.mean, stats.std, stats.max_abs
    )
}

pub fn format_episode_line(episode: &EpisodeSummary) -> String {
    format!(
        "  Episode {:>3}: t={:.2}s..{:.2}s ({} samples) | \
         Pitch mean={:.2}° max={:.2}° | Roll mean={:.2}° max={:.2}°",
        episode.episode_index,
        episode.start_time,
        episode.end_time,
        episode.sample_count(),
        episode.stats_deg.pitch.mean,
        episode.stats_deg.pitch.max_abs,
        episode.stats_deg.roll.mean,
        episode.stats_deg.roll.max_abs,
    )
}

/// Builds the console summary of one analysis.
pub fn summary_lines(
    source: &TelemetrySource,
    analysis: &AttitudeAnalysis,
    per_episode: bool,
) -> Vec<String> {
    let mut lines = vec![
        format!("File: {}", source.file_name()),
        format!(
            "Number of data points: {} ({} valid, {} reset markers)",
            analysis.raw_row_count,
            analysis.record_count(),
            analysis.reset_count
        ),
        format!("Detected {} episodes", analysis.episode_count()),
    ];
    if let Some(interval) = analysis.sample_interval {
        lines.push(format!("Nominal sample interval: {:.4}s ({:.1} Hz)", interval, 1.0 / interval));
    }
    if !analysis.agreement.is_consistent() {
        lines.push(format!(
            "Warning: reset markers and time gaps disagree (reset-only at {:?}, gap-only at {:?})",
            analysis.agreement.reset_only, analysis.agreement.gap_only
        ));
    }

    lines.push(String::new());
    lines.push("Basic Statistics:".to_string());
    lines.push(format_stats_line("Pitch", &analysis.stats_deg.pitch, AngleUnit::Degrees));
    lines.push(format_stats_line("Roll", &analysis.stats_deg.roll, AngleUnit::Degrees));

    if per_episode {
        lines.push(String::new());
        lines.push("Per-Episode Statistics:".to_string());
        lines.extend(analysis.episodes.iter().map(format_episode_line));
    }
    lines
}

/// Prints statistics to stdout.
pub struct ConsoleReportSink {
    pub per_episode: bool,
}

impl RenderSink for ConsoleReportSink {
    fn name(&self) -> &str {
        "console"
    }

    fn render(
        &mut self,
        source: &TelemetrySource,
        analysis: &AttitudeAnalysis,
    ) -> Result<(), AnalysisError> {
        for line in summary_lines(source, analysis, self.per_episode) {
            println!("{line}");
        }
        Ok(())
    }
}

const EPISODE_CSV_HEADER: [&str; 13] = [
    "episode",
    "start_index",
    "end_index",
    "samples",
    "start_time",
    "end_time",
    "duration",
    "pitch_mean_deg",
    "pitch_std_deg",
    "pitch_max_abs_deg",
    "roll_mean_deg",
    "roll_std_deg",
    "roll_max_abs_deg",
];

/// Writes one CSV row per episode.
pub fn write_episode_csv<W: Write>(
    writer: W,
    episodes: &[EpisodeSummary],
) -> Result<(), AnalysisError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EPISODE_CSV_HEADER)?;
    for episode in episodes {
        let pitch = &episode.stats_deg.pitch;
        let roll = &episode.stats_deg.roll;
        wtr.write_record(&[
            episode.episode_index.to_string(),
            episode.start_index.to_string(),
            episode.end_index.to_string(),
            episode.sample_count().to_string(),
            format!("{:.6}", episode.start_time),
            format!("{:.6}", episode.end_time),
            format!("{:.6}", episode.duration()),
            format!("{:.6}", pitch.mean),
            format!("{:.6}", pitch.std),
            format!("{:.6}", pitch.max_abs),
            format!("{:.6}", roll.mean),
            format!("{:.6}", roll.std),
            format!("{:.6}", roll.max_abs),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Exports per-episode statistics as `episodes_<stem>.csv`.
pub struct EpisodeCsvSink {
    pub output: OutputLocation,
}

impl RenderSink for EpisodeCsvSink {
    fn name(&self) -> &str {
        "episode-csv"
    }

    fn render(
        &mut self,
        source: &TelemetrySource,
        analysis: &AttitudeAnalysis,
    ) -> Result<(), AnalysisError> {
        let dir = self.output.prepare(source)?;
        let path = dir.join(format!("{EPISODES_FILE_PREFIX}{}.csv", source.root_name));
        let file = fs::File::create(&path).map_err(|e| AnalysisError::io(&path, e))?;
        write_episode_csv(file, &analysis.episodes)?;
        debug!("Wrote {} episode rows", analysis.episodes.len());
        println!("  Episode statistics saved as '{}'.", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::data_input::telemetry_record::{TelemetryRecord, TelemetryRow};
    use crate::orchestrator::analyze_rows;

    fn two_episode_analysis() -> AttitudeAnalysis {
        let rows: Vec<TelemetryRow> = [(0.0, 10.0), (0.02, -10.0), (1.0, 10.0), (1.02, -10.0)]
            .iter()
            .map(|&(t, deg)| {
                TelemetryRow::Sample(TelemetryRecord {
                    time: t,
                    pitch: 0.0,
                    roll: 0.0,
                    pitch_deg: deg,
                    roll_deg: 2.0,
                })
            })
            .collect();
        analyze_rows(&rows, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn test_format_stats_line() {
        let stats = AttitudeStats { mean: 0.0, std: 10.0, max_abs: 10.0 };
        assert_eq!(
            format_stats_line("Pitch", &stats, AngleUnit::Degrees),
            "Pitch: Mean=0.00°, Std Dev=10.00°, Max Abs=10.00°"
        );
        assert_eq!(
            format_stats_line("Roll", &stats, AngleUnit::Radians),
            "Roll: Mean=0.00 rad, Std Dev=10.00 rad, Max Abs=10.00 rad"
        );
    }

    #[test]
    fn test_summary_lines() {
        let analysis = two_episode_analysis();
        let source = TelemetrySource::new(Path::new("logs/run.csv"));
        let lines = summary_lines(&source, &analysis, true);
        assert!(lines.contains(&"Detected 2 episodes".to_string()));
        let pitch_line = "Pitch: Mean=0.00°, Std Dev=10.00°, Max Abs=10.00°".to_string();
        assert!(lines.contains(&pitch_line));
        assert!(lines.iter().any(|l| l.starts_with("  Episode   1:")));
        // No reset markers, but a gap: flagged.
        assert!(lines
            .iter()
            .any(|l| l.starts_with("Warning: reset markers and time gaps disagree")));
    }

    #[test]
    fn test_write_episode_csv() {
        let analysis = two_episode_analysis();
        let mut buffer = Vec::new();
        write_episode_csv(&mut buffer, &analysis.episodes).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("episode,start_index,end_index,samples"));
        assert!(lines[2].starts_with("1,2,4,2,1.000000,1.020000"));
    }

    #[test]
    fn test_output_location() {
        let source = TelemetrySource::new(Path::new("/data/logs/run.csv"));
        assert_eq!(
            OutputLocation::BesideSource.resolve(&source),
            PathBuf::from("/data/logs/analysis")
        );
        assert_eq!(
            OutputLocation::Fixed(PathBuf::from("/out")).resolve(&source),
            PathBuf::from("/out")
        );
    }

    #[test]
    fn test_episode_csv_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = two_episode_analysis();
        let source = TelemetrySource::new(&dir.path().join("run_b.csv"));
        let mut sink = EpisodeCsvSink { output: OutputLocation::Fixed(dir.path().join("out")) };
        sink.render(&source, &analysis).unwrap();
        assert!(dir.path().join("out").join("episodes_run_b.csv").exists());
    }
}
