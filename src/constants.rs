// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUE, GREY, RED};
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 2400;
pub const PLOT_HEIGHT: u32 = 1800;

// Episode segmentation.
pub const DEFAULT_GAP_THRESHOLD_S: f64 = 0.1; // Time step above which a new episode starts

// Batch discovery.
pub const DEFAULT_FILE_PATTERN: &str = "late_training_attitude_*.csv";
pub const DEFAULT_OUTPUT_SUBDIR: &str = "analysis";

// Output file name parts.
pub const TIMESERIES_FILE_PREFIX: &str = "separate_attitude_timeseries_";
pub const RADIANS_FILE_SUFFIX: &str = "_attitude_radians.png";
pub const EPISODES_FILE_PREFIX: &str = "episodes_";

// --- Plot Color Assignments ---
pub const COLOR_PITCH_MAIN: &RGBColor = &BLUE;
pub const COLOR_ROLL_MAIN: &RGBColor = &RED;
pub const COLOR_PITCH_RADIANS: &RGBColor = &BLUE;
pub const COLOR_ROLL_RADIANS: RGBColor = RGBColor(0, 128, 0);
pub const COLOR_EPISODE_MARKER: &RGBColor = &GREY;
pub const COLOR_ZERO_REFERENCE: &RGBColor = &RED;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const LINE_WIDTH_MARKER: u32 = 1;

// Dashed marker lines are drawn as this many dash segments.
pub const MARKER_DASH_SEGMENTS: usize = 30;

// Font sizes
pub const FONT_SIZE_MAIN_TITLE: i32 = 28;
pub const FONT_SIZE_CHART_TITLE: i32 = 24;
pub const FONT_SIZE_AXIS_LABEL: i32 = 16;
pub const FONT_SIZE_LEGEND: i32 = 16;
pub const FONT_SIZE_ANNOTATION: i32 = 18;

// src/constants.rs
