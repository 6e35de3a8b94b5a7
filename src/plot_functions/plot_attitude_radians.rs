// src/plot_functions/plot_attitude_radians.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::axis_names::{axis_name, AttitudeAxis, AttitudeField};
use crate::config::PlotSettings;
use crate::constants::{
    COLOR_PITCH_RADIANS, COLOR_ROLL_RADIANS, COLOR_ZERO_REFERENCE, LINE_WIDTH_MARKER,
    RADIANS_FILE_SUFFIX,
};
use crate::data_analysis::attitude_stats::AttitudeStats;
use crate::orchestrator::AttitudeAnalysis;
use crate::plot_framework::{draw_stacked_panels, MarkerLines};
use crate::plot_functions::plot_attitude_timeseries::attitude_panel;

/// Annotation lines shown in the corner of a radian panel.
pub fn stats_annotation(stats: &AttitudeStats) -> Vec<String> {
    vec![
        format!("Mean: {:.2} rad", stats.mean),
        format!("Std Dev: {:.2} rad", stats.std),
        format!("Max Offset: {:.2} rad", stats.max_abs),
    ]
}

pub fn radians_output_path(output_dir: &Path, root_name: &str) -> PathBuf {
    output_dir.join(format!("{root_name}{RADIANS_FILE_SUFFIX}"))
}

/// Generates the stacked Pitch/Roll (radians) plot with statistics annotations
/// and a dashed zero reference line.
pub fn plot_attitude_radians(
    analysis: &AttitudeAnalysis,
    root_name: &str,
    output_dir: &Path,
    settings: &PlotSettings,
) -> Result<PathBuf, Box<dyn Error>> {
    let output_path = radians_output_path(output_dir, root_name);

    let zero_reference = MarkerLines {
        vertical: Vec::new(),
        horizontal: vec![0.0],
        color: *COLOR_ZERO_REFERENCE,
        stroke_width: LINE_WIDTH_MARKER,
    };

    let panels = [
        attitude_panel(
            &analysis.records,
            AttitudeField::PITCH,
            *COLOR_PITCH_RADIANS,
            format!("{} Angle Over Time", axis_name(AttitudeAxis::Pitch)),
            vec![zero_reference.clone()],
            stats_annotation(&analysis.stats_rad.pitch),
            settings,
        ),
        attitude_panel(
            &analysis.records,
            AttitudeField::ROLL,
            COLOR_ROLL_RADIANS,
            format!("{} Angle Over Time", axis_name(AttitudeAxis::Roll)),
            vec![zero_reference],
            stats_annotation(&analysis.stats_rad.roll),
            settings,
        ),
    ]
    .into_iter()
    .collect::<Option<Vec<_>>>()
    .ok_or("No records to plot")?;

    draw_stacked_panels(&output_path, root_name, &panels, (settings.width, settings.height))?;
    Ok(output_path)
}
