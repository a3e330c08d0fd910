// src/plot_functions/mod.rs

pub mod plot_coupled_mismatch;
pub mod plot_joint_traces;
pub mod plot_overall_mismatch;

use std::path::{Path, PathBuf};

use crate::config::OutputFormat;

/// Output path `<dir>/<prefix>_<base>.<ext>`, or `<dir>/<base>.<ext>` without a prefix.
pub fn output_path(dir: &Path, prefix: Option<&str>, base: &str, format: OutputFormat) -> PathBuf {
    let file_name = match prefix {
        Some(p) if !p.is_empty() => format!("{p}_{base}.{}", format.extension()),
        _ => format!("{base}.{}", format.extension()),
    };
    dir.join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_without_prefix() {
        let path = output_path(Path::new("out"), None, "overall_mismatch", OutputFormat::Svg);
        assert_eq!(path, PathBuf::from("out/overall_mismatch.svg"));
    }

    #[test]
    fn test_output_path_with_prefix() {
        let path = output_path(Path::new("."), Some("run_3"), "FFJ1_mw_data", OutputFormat::Png);
        assert_eq!(path, Path::new(".").join("run_3_FFJ1_mw_data.png"));
    }
}

// src/plot_functions/mod.rs
