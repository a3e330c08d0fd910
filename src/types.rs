// src/types.rs
// Type aliases shared between the analysis and plotting layers

use ndarray::Array1;

/// Windowed |command - state| values of one joint (rad).
pub type MismatchSeries = Array1<f64>;

/// (elapsed time s, value) points of one plotted line.
pub type TimeSeriesPoints = Vec<(f64, f64)>;
