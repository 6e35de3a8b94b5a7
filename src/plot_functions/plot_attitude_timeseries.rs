// src/plot_functions/plot_attitude_timeseries.rs

use plotters::style::RGBColor;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::axis_names::{axis_name, AttitudeAxis, AttitudeField, ATTITUDE_AXES};
use crate::config::PlotSettings;
use crate::constants::{
    COLOR_EPISODE_MARKER, COLOR_PITCH_MAIN, COLOR_ROLL_MAIN, LINE_WIDTH_MARKER,
    TIMESERIES_FILE_PREFIX,
};
use crate::data_input::telemetry_record::TelemetryRecord;
use crate::orchestrator::AttitudeAnalysis;
use crate::plot_framework::{
    calculate_range, draw_stacked_panels, MarkerLines, PlotSeries, StackedPanel,
};

/// Builds one time-series panel for `field`. None if there are no records.
pub fn attitude_panel(
    records: &[TelemetryRecord],
    field: AttitudeField,
    color: RGBColor,
    title: String,
    markers: Vec<MarkerLines>,
    annotations: Vec<String>,
    settings: &PlotSettings,
) -> Option<StackedPanel> {
    if records.is_empty() {
        return None;
    }

    let mut time_min = f64::INFINITY;
    let mut time_max = f64::NEG_INFINITY;
    let mut val_min = f64::INFINITY;
    let mut val_max = f64::NEG_INFINITY;
    let mut data = Vec::with_capacity(records.len());

    for record in records {
        let value = record.value(field);
        time_min = time_min.min(record.time);
        time_max = time_max.max(record.time);
        val_min = val_min.min(value);
        val_max = val_max.max(value);
        data.push((record.time, value));
    }

    // A single timestamp still needs a non-empty x range.
    let (time_min, time_max) = if time_max > time_min {
        (time_min, time_max)
    } else {
        calculate_range(time_min, time_max)
    };
    let (final_value_min, final_value_max) = calculate_range(val_min, val_max);
    let name = axis_name(field.axis);

    Some(StackedPanel {
        title,
        x_range: time_min..time_max,
        y_range: final_value_min..final_value_max,
        series: vec![PlotSeries {
            data,
            label: format!("{} ({})", name, field.unit.label()),
            color,
            stroke_width: settings.line_width,
        }],
        x_label: "Time (s)".to_string(),
        y_label: format!("{} Angle ({})", name, field.unit.label()),
        markers,
        annotations,
    })
}

/// Output path of the stacked pitch/roll figure for a source.
pub fn timeseries_output_path(output_dir: &Path, root_name: &str) -> PathBuf {
    output_dir.join(format!("{TIMESERIES_FILE_PREFIX}{root_name}.png"))
}

/// Generates the stacked Pitch/Roll (degrees) plot with a dashed marker at
/// every detected episode start.
pub fn plot_attitude_timeseries(
    analysis: &AttitudeAnalysis,
    root_name: &str,
    output_dir: &Path,
    settings: &PlotSettings,
) -> Result<PathBuf, Box<dyn Error>> {
    let output_path = timeseries_output_path(output_dir, root_name);

    let episode_markers = MarkerLines {
        vertical: analysis.boundary_times(),
        horizontal: Vec::new(),
        color: *COLOR_EPISODE_MARKER,
        stroke_width: LINE_WIDTH_MARKER,
    };
    let episode_count = analysis.episode_count();

    let panels: Vec<StackedPanel> = ATTITUDE_AXES
        .iter()
        .map(|&axis| {
            let (field, color) = match axis {
                AttitudeAxis::Pitch => (AttitudeField::PITCH_DEG, *COLOR_PITCH_MAIN),
                AttitudeAxis::Roll => (AttitudeField::ROLL_DEG, *COLOR_ROLL_MAIN),
            };
            attitude_panel(
                &analysis.records,
                field,
                color,
                format!("{} Angle ({} episodes)", axis_name(axis), episode_count),
                vec![episode_markers.clone()],
                Vec::new(),
                settings,
            )
        })
        .collect::<Option<Vec<_>>>()
        .ok_or("No records to plot")?;

    draw_stacked_panels(&output_path, root_name, &panels, (settings.width, settings.height))?;
    Ok(output_path)
}
