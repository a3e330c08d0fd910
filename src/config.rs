// src/config.rs

//! Run configuration: built-in defaults, optionally overridden by a TOML file,
//! then by command-line flags.
//!
//! ```toml
//! t_start = 1.0
//! t_end = 7.0
//! color_mode = "distinct"
//! plots = ["overall", "coupled"]
//! legend_joints = ["WRJ1", "WRJ2"]
//!
//! independent_joints = ["WRJ1", "WRJ2"]
//!
//! [[coupled_joints]]
//! id = "FFJ0"
//! joints = ["FFJ1", "FFJ2"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{DEFAULT_T_END_S, DEFAULT_T_START_S, DEFAULT_TIMESTAMP_SCALE};
use crate::joint_names::{JointTopology, TopologyPreset};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How the coupled/uncoupled chart assigns colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// One color per coupling class, with "coupled" and "uncoupled" legend entries.
    #[default]
    Same,
    /// One color and legend entry per joint.
    Distinct,
}

/// Chart styles that can be rendered for each input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    /// Every joint's mismatch overlaid on one chart.
    Overall,
    /// One command/state/mismatch chart per joint.
    Joints,
    /// Coupled virtual joints against uncoupled joints.
    Coupled,
}

impl PlotKind {
    pub const ALL: [PlotKind; 3] = [PlotKind::Overall, PlotKind::Joints, PlotKind::Coupled];

    /// Topology a chart uses when no custom topology is configured.
    pub fn default_preset(self) -> TopologyPreset {
        match self {
            PlotKind::Overall | PlotKind::Joints => TopologyPreset::All,
            PlotKind::Coupled => TopologyPreset::Coupled,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoupledJointConfig {
    pub id: String,
    pub joints: [String; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub csv_files: Vec<PathBuf>,
    pub t_start: f64,
    pub t_end: f64,
    pub color_mode: ColorMode,
    pub plots: Vec<PlotKind>,
    pub output_dir: PathBuf,
    pub output_format: OutputFormat,
    pub timestamp_scale: f64,
    /// Joints that get a legend entry on the overall chart. Empty labels every joint.
    pub legend_joints: Vec<String>,
    pub joint_file_suffix: String,
    pub title: Option<String>,
    pub independent_joints: Option<Vec<String>>,
    pub coupled_joints: Option<Vec<CoupledJointConfig>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            csv_files: Vec::new(),
            t_start: DEFAULT_T_START_S,
            t_end: DEFAULT_T_END_S,
            color_mode: ColorMode::default(),
            plots: PlotKind::ALL.to_vec(),
            output_dir: PathBuf::from("."),
            output_format: OutputFormat::default(),
            timestamp_scale: DEFAULT_TIMESTAMP_SCALE,
            legend_joints: vec!["WRJ1".to_string(), "WRJ2".to_string()],
            joint_file_suffix: "_mw_data".to_string(),
            title: None,
            independent_joints: None,
            coupled_joints: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.t_start.is_finite() || !self.t_end.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "window bounds must be finite (t_start = {}, t_end = {})",
                self.t_start, self.t_end
            )));
        }
        if !self.timestamp_scale.is_finite() || self.timestamp_scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "timestamp_scale must be a positive number, got {}",
                self.timestamp_scale
            )));
        }
        if self.plots.is_empty() {
            return Err(ConfigError::Invalid("at least one plot kind is required".to_string()));
        }
        if let Some(coupled) = &self.coupled_joints {
            for entry in coupled {
                if entry.id.trim().is_empty() || entry.joints.iter().any(|j| j.trim().is_empty()) {
                    return Err(ConfigError::Invalid(format!(
                        "coupled joint '{}' needs an id and two joint names",
                        entry.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn has_custom_topology(&self) -> bool {
        self.independent_joints.is_some() || self.coupled_joints.is_some()
    }

    /// Topology for a chart: the configured one if any, otherwise the chart's preset.
    pub fn topology_for(&self, kind: PlotKind) -> JointTopology {
        if !self.has_custom_topology() {
            return JointTopology::from_preset(kind.default_preset());
        }
        let mut topology = JointTopology::new();
        for joint in self.independent_joints.iter().flatten() {
            topology.push_independent(joint.as_str());
        }
        for entry in self.coupled_joints.iter().flatten() {
            let [j1, j2] = &entry.joints;
            topology.push_coupled(entry.id.as_str(), j1.as_str(), j2.as_str());
        }
        topology
    }
}

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("Failed to parse config TOML: {}", e);
                Err(ConfigError::Toml(e))
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file '{}': {}", path.display(), e);
            Err(ConfigError::Io(e))
        }
    }
}
