// src/main.rs

use clap::Parser;
use std::error::Error;
use tracing::{info, warn, Level};

use shadowhand_csv_render::cli::Cli;
use shadowhand_csv_render::run::{process_file, run_files};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    info!("shadowhand_csv_render {}", shadowhand_csv_render::crate_version());

    // Defaults, then the TOML file, then command-line flags
    let config = cli.resolve_config()?;

    if config.csv_files.is_empty() {
        return Err("No input CSV files given (pass them as arguments or set csv_files in the config)".into());
    }
    // An inverted window is allowed; it just selects nothing
    if config.t_start > config.t_end {
        warn!(
            "Window start {} s is after window end {} s; every chart will be empty.",
            config.t_start, config.t_end
        );
    }
    info!(
        "Analysis window: [{:.2} s, {:.2} s] after the first sample",
        config.t_start, config.t_end
    );

    std::fs::create_dir_all(&config.output_dir)?;

    // Files are independent runs; keep going past failures and report them at the end
    let failed_files = run_files(&config.csv_files, |csv_path, prefix| {
        process_file(csv_path, &config, prefix)
    });

    if !failed_files.is_empty() {
        let names: Vec<String> = failed_files.iter().map(|p| p.display().to_string()).collect();
        return Err(format!(
            "{} of {} files failed: {}",
            failed_files.len(),
            config.csv_files.len(),
            names.join(", ")
        )
        .into());
    }
    info!("\nDone.");
    Ok(())
}
