// src/font_config.rs

// Global font style constants for plot rendering.
// Every chart takes its text styling from here so the analysis code never
// touches presentation state.

use crate::constants::{
    FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND, FONT_SIZE_MESSAGE,
};

/// Serif family, resolved by the renderer to Times New Roman or the closest system match.
pub const FONT_FAMILY_CHART: &str = "serif";

/// Font family used for "data unavailable" placeholders
pub const FONT_FAMILY_SYSTEM: &str = "sans-serif";

// Tuple representations for use with plotters' IntoFont trait
// These are convenient for direct use with plotters methods like `.caption()` and `.label_style()`
pub const FONT_TUPLE_CHART_TITLE: (&str, i32) = (FONT_FAMILY_CHART, FONT_SIZE_CHART_TITLE);
pub const FONT_TUPLE_AXIS_LABEL: (&str, i32) = (FONT_FAMILY_CHART, FONT_SIZE_AXIS_LABEL);
pub const FONT_TUPLE_LEGEND: (&str, i32) = (FONT_FAMILY_CHART, FONT_SIZE_LEGEND);
pub const FONT_TUPLE_MESSAGE: (&str, i32) = (FONT_FAMILY_SYSTEM, FONT_SIZE_MESSAGE);
