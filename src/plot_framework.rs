// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    FONT_SIZE_ANNOTATION, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND,
    FONT_SIZE_MAIN_TITLE, LINE_WIDTH_LEGEND, MARKER_DASH_SEGMENTS,
};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Splits the line from `from` to `to` into `segments` dashes with equal gaps.
pub fn dash_segments(from: (f64, f64), to: (f64, f64), segments: usize) -> Vec<[(f64, f64); 2]> {
    if segments == 0 {
        return Vec::new();
    }
    let step = 1.0 / (segments as f64 * 2.0); // Half for dash, half for gap
    let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    (0..segments)
        .map(|i| {
            let t0 = i as f64 * 2.0 * step;
            [lerp(t0), lerp(t0 + step)]
        })
        .collect()
}

#[derive(Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

/// Dashed reference lines drawn across a panel.
#[derive(Clone)]
pub struct MarkerLines {
    /// X positions of vertical lines spanning the full Y range.
    pub vertical: Vec<f64>,
    /// Y positions of horizontal lines spanning the full X range.
    pub horizontal: Vec<f64>,
    pub color: RGBColor,
    pub stroke_width: u32,
}

impl MarkerLines {
    /// Endpoints of every marker line that lies within the panel. Both range
    /// ends are inclusive, so a marker on the last sample is kept.
    pub fn visible_lines(
        &self,
        x_range: &Range<f64>,
        y_range: &Range<f64>,
    ) -> Vec<((f64, f64), (f64, f64))> {
        let within = |v: f64, r: &Range<f64>| v.is_finite() && v >= r.start && v <= r.end;
        let vertical = self
            .vertical
            .iter()
            .filter(|&&x| within(x, x_range))
            .map(|&x| ((x, y_range.start), (x, y_range.end)));
        let horizontal = self
            .horizontal
            .iter()
            .filter(|&&y| within(y, y_range))
            .map(|&y| ((x_range.start, y), (x_range.end, y)));
        vertical.chain(horizontal).collect()
    }
}

/// One row of a stacked figure.
#[derive(Clone)]
pub struct StackedPanel {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<PlotSeries>,
    pub x_label: String,
    pub y_label: String,
    pub markers: Vec<MarkerLines>,
    /// Text lines drawn in the upper-left corner of the panel.
    pub annotations: Vec<String>,
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    panel: &StackedPanel,
) -> Result<(), Box<dyn Error>> {
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(panel.x_range.clone(), panel.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(&panel.x_label)
        .y_desc(&panel.y_label)
        .x_labels(20)
        .y_labels(10)
        .y_label_formatter(&|y| format!("{:.1}", y))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    // Markers go BEFORE series so data appears on top
    for marker in &panel.markers {
        let style = marker.color.mix(0.7).stroke_width(marker.stroke_width);
        for (from, to) in marker.visible_lines(&panel.x_range, &panel.y_range) {
            for dash in dash_segments(from, to, MARKER_DASH_SEGMENTS) {
                chart.draw_series(LineSeries::new(dash, style))?;
            }
        }
    }

    let mut legend_series_count = 0;
    for s in &panel.series {
        if s.data.is_empty() {
            continue;
        }
        let series = chart.draw_series(LineSeries::new(
            s.data.iter().cloned(),
            s.color.stroke_width(s.stroke_width),
        ))?;
        if !s.label.is_empty() {
            let color = s.color;
            series.label(&s.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }

    if !panel.annotations.is_empty() {
        let x_span = panel.x_range.end - panel.x_range.start;
        let y_span = panel.y_range.end - panel.y_range.start;
        let text_style = ("sans-serif", FONT_SIZE_ANNOTATION).into_font().color(&BLACK);
        for (line_index, line) in panel.annotations.iter().enumerate() {
            let x = panel.x_range.start + x_span * 0.01;
            let y = panel.y_range.end - y_span * (0.03 + 0.07 * line_index as f64);
            chart.draw_series(std::iter::once(Text::new(
                line.clone(),
                (x, y),
                text_style.clone(),
            )))?;
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }
    Ok(())
}

/// Draws `panels` stacked vertically into one PNG titled with `root_name`.
pub fn draw_stacked_panels(
    output_path: &Path,
    root_name: &str,
    panels: &[StackedPanel],
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(output_path, size).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE).into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let sub_plot_areas = margined_root_area.split_evenly((panels.len().max(1), 1));

    for (panel, area) in panels.iter().zip(sub_plot_areas.iter()) {
        draw_panel(area, panel)?;
    }

    root_area.present()?;
    println!("  Stacked plot saved as '{}'.", output_path.display());
    Ok(())
}
