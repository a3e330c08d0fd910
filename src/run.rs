// src/run.rs

use std::error::Error;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::config::{AnalysisConfig, PlotKind};
use crate::data_analysis::mismatch::{compute_all, compute_traces, MismatchReport};
use crate::data_analysis::summary::{summarize, worst_joint};
use crate::data_input::log_parser::parse_log_file;
use crate::plot_functions::output_path;
use crate::plot_functions::plot_coupled_mismatch::{plot_coupled_mismatch, COUPLED_MISMATCH_FILE};
use crate::plot_functions::plot_joint_traces::plot_joint_traces;
use crate::plot_functions::plot_overall_mismatch::{plot_overall_mismatch, OVERALL_MISMATCH_FILE};

/// Output file prefix for each input, in input order.
///
/// A single input gets no prefix. Otherwise each input is named by its file stem;
/// stems shared by several inputs are qualified with the parent directory name,
/// and any name still shared gets the input's 1-based position appended.
pub fn output_prefixes(csv_files: &[PathBuf]) -> Vec<Option<String>> {
    if csv_files.len() <= 1 {
        return vec![None; csv_files.len()];
    }

    let stems: Vec<String> = csv_files
        .iter()
        .map(|p| p.file_stem().unwrap_or_default().to_string_lossy().into_owned())
        .collect();

    let qualified: Vec<String> = csv_files
        .iter()
        .zip(&stems)
        .map(|(path, stem)| {
            if occurrences(&stems, stem) == 1 {
                return stem.clone();
            }
            match path.parent().and_then(Path::file_name) {
                Some(parent) => format!("{}_{}", parent.to_string_lossy(), stem),
                None => stem.clone(),
            }
        })
        .collect();

    let mut prefixes: Vec<String> = Vec::with_capacity(qualified.len());
    for (i, name) in qualified.iter().enumerate() {
        let mut prefix = if occurrences(&qualified, name) > 1 {
            format!("{name}_{}", i + 1)
        } else {
            name.clone()
        };
        // Never reuse an earlier prefix or take another input's own name.
        while prefixes.contains(&prefix) || (prefix != *name && qualified.contains(&prefix)) {
            prefix.push_str(&format!("_{}", i + 1));
        }
        prefixes.push(prefix);
    }
    prefixes.into_iter().map(Some).collect()
}

fn occurrences(names: &[String], name: &str) -> usize {
    names.iter().filter(|n| *n == name).count()
}

fn log_summary(report: &MismatchReport) {
    let summaries = summarize(report);
    info!("  Mismatch summary over {} samples:", report.times.len());
    for s in &summaries {
        match (s.peak, s.mean, s.rms) {
            (Some(peak), Some(mean), Some(rms)) => debug!(
                "    {:<5} {} peak {:.4} rad, mean {:.4} rad, rms {:.4} rad",
                s.joint,
                if s.coupled { "(coupled)  " } else { "(uncoupled)" },
                peak,
                mean,
                rms
            ),
            _ => debug!("    {:<5} no samples in window", s.joint),
        }
    }
    if let Some(worst) = worst_joint(&summaries) {
        info!(
            "  Largest mismatch: {} ({:.4} rad)",
            worst.joint,
            worst.peak.unwrap_or_default()
        );
    }
}

/// Loads one joint log and renders every configured chart for it.
pub fn process_file(
    csv_path: &Path,
    config: &AnalysisConfig,
    prefix: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    // --- Load the log once; every chart reads from the same table ---
    let table = parse_log_file(csv_path, config.timestamp_scale)?;
    let title = config.title.as_deref();
    let dir = config.output_dir.as_path();
    let format = config.output_format;

    for &kind in &config.plots {
        // Each chart picks its own topology unless the config supplies one
        let topology = config.topology_for(kind);
        match kind {
            PlotKind::Overall => {
                info!("\n--- Generating Overall Mismatch Plot ---");
                let report = compute_all(&table, &topology, config.t_start, config.t_end)?;
                log_summary(&report);
                let path = output_path(dir, prefix, OVERALL_MISMATCH_FILE, format);
                plot_overall_mismatch(&report, &path, format, &config.legend_joints, title)?;
            }
            PlotKind::Joints => {
                info!("\n--- Generating Joint Trace Plots ---");
                // One file per joint; a failed joint does not stop the rest
                let traces = compute_traces(&table, &topology, config.t_start, config.t_end)?;
                plot_joint_traces(&traces, dir, prefix, &config.joint_file_suffix, format, title)?;
            }
            PlotKind::Coupled => {
                info!("\n--- Generating Coupled Mismatch Plot ---");
                let report = compute_all(&table, &topology, config.t_start, config.t_end)?;
                log_summary(&report);
                let path = output_path(dir, prefix, COUPLED_MISMATCH_FILE, format);
                plot_coupled_mismatch(&report, &path, format, config.color_mode, title)?;
            }
        }
    }
    Ok(())
}

/// Runs `process` on every input in turn, each with its own output prefix.
///
/// A failing input is logged and the remaining inputs still run.
/// Returns the inputs that failed.
pub fn run_files<F>(csv_files: &[PathBuf], mut process: F) -> Vec<PathBuf>
where
    F: FnMut(&Path, Option<&str>) -> Result<(), Box<dyn Error>>,
{
    let prefixes = output_prefixes(csv_files);
    let mut failed_files = Vec::new();
    for (csv_path, prefix) in csv_files.iter().zip(&prefixes) {
        info!("\n=== Processing '{}' ===", csv_path.display());
        if let Err(e) = process(csv_path, prefix.as_deref()) {
            error!("Failed to process '{}': {}", csv_path.display(), e);
            failed_files.push(csv_path.clone());
        }
    }
    failed_files
}
