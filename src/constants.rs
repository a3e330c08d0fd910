// src/constants.rs

use plotters::style::RGBColor;

// Analysis window, relative to the first sample.
pub const DEFAULT_T_START_S: f64 = 1.0;
pub const DEFAULT_T_END_S: f64 = 7.0;

// Multiplier applied to raw timestamps to get seconds.
pub const DEFAULT_TIMESTAMP_SCALE: f64 = 1.0;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1200;
pub const PLOT_HEIGHT: u32 = 700;
pub const JOINT_PLOT_WIDTH: u32 = 1000;
pub const JOINT_PLOT_HEIGHT: u32 = 600;

// Font sizes (px). The analysis charts use one large size throughout.
pub const FONT_SIZE_CHART_TITLE: i32 = 22;
pub const FONT_SIZE_AXIS_LABEL: i32 = 20;
pub const FONT_SIZE_LEGEND: i32 = 20;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// --- Plot Color Assignments ---
pub const COLOR_COUPLED: RGBColor = RGBColor(31, 119, 180); // tab:blue
pub const COLOR_UNCOUPLED: RGBColor = RGBColor(255, 127, 14); // tab:orange
pub const COLOR_COMMAND: RGBColor = COLOR_COUPLED;
pub const COLOR_STATE: RGBColor = COLOR_UNCOUPLED;
pub const COLOR_TRACE_MISMATCH: RGBColor = RGBColor(214, 39, 40); // tab:red

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 3;

// Dash pattern (px) for command and mismatch traces.
pub const DASH_LENGTH_PX: u32 = 10;
pub const DASH_GAP_PX: u32 = 6;
pub const DOT_LENGTH_PX: u32 = 2;
pub const DOT_GAP_PX: u32 = 4;

// src/constants.rs
