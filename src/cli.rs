// src/cli.rs

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::config::{load_config, AnalysisConfig, ColorMode, ConfigError, OutputFormat, PlotKind};

/// Plots command/state mismatch of Shadow Hand joints from CSV logs.
#[derive(Parser, Debug)]
#[command(name = "shadowhand_csv_render", version, about)]
pub struct Cli {
    /// Joint log CSV files (Timestamp, cmd_<joint>, state_<joint> columns)
    pub csv_files: Vec<PathBuf>,

    /// TOML configuration file; command-line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window start in seconds after the first sample
    #[arg(long, allow_hyphen_values = true)]
    pub t_start: Option<f64>,

    /// Window end in seconds after the first sample
    #[arg(long, allow_hyphen_values = true)]
    pub t_end: Option<f64>,

    /// Coloring of the coupled mismatch chart
    #[arg(long, value_enum)]
    pub color_mode: Option<ColorMode>,

    /// Charts to render (repeatable); defaults to all of them
    #[arg(long = "plot", value_enum)]
    pub plots: Vec<PlotKind>,

    /// Directory the charts are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Image format of the charts
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Multiplier turning raw timestamps into seconds (e.g. 1e-9 for nanoseconds)
    #[arg(long)]
    pub timestamp_scale: Option<f64>,

    /// Title drawn above each chart
    #[arg(long)]
    pub title: Option<String>,

    /// Comma-separated joints shown in the overall chart legend ("" for all)
    #[arg(long, value_delimiter = ',')]
    pub legend_joints: Option<Vec<String>>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Overlays every flag that was given on top of `config`.
    pub fn apply_overrides(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if !self.csv_files.is_empty() {
            config.csv_files = self.csv_files.clone();
        }
        if let Some(t_start) = self.t_start {
            config.t_start = t_start;
        }
        if let Some(t_end) = self.t_end {
            config.t_end = t_end;
        }
        if let Some(color_mode) = self.color_mode {
            config.color_mode = color_mode;
        }
        if !self.plots.is_empty() {
            config.plots = self.plots.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(format) = self.format {
            config.output_format = format;
        }
        if let Some(scale) = self.timestamp_scale {
            config.timestamp_scale = scale;
        }
        if let Some(title) = &self.title {
            config.title = Some(title.clone());
        }
        if let Some(joints) = &self.legend_joints {
            config.legend_joints = joints.iter().filter(|j| !j.trim().is_empty()).cloned().collect();
        }
        config
    }

    /// Builds the run configuration: defaults, then the TOML file if one was given,
    /// then the command-line flags. The result is validated and its plot list deduplicated.
    pub fn resolve_config(&self) -> Result<AnalysisConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                load_config(path)?
            }
            None => AnalysisConfig::default(),
        };
        let mut config = self.apply_overrides(base);
        config.validate()?;

        let mut seen = Vec::with_capacity(config.plots.len());
        config.plots.retain(|kind| {
            let first = !seen.contains(kind);
            seen.push(*kind);
            first
        });
        Ok(config)
    }
}
