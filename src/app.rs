//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the output location and creates it
//! - pages through the Cost Optimization Hub listing
//! - streams rows into the CSV file
//! - prints the outcome

use std::path::Path;

use clap::Parser;

use crate::config::ExportConfig;
use crate::data::hub::{HubClient, default_filter};
use crate::domain::ExportSummary;
use crate::error::AppError;

/// Entry point for the `coh-export` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    let config = ExportConfig::from_cli(&cli);

    // Directory creation happens before any network call so a bad output root
    // fails immediately.
    let folder = config.ensure_output_dir()?;
    println!("Output folder: {}", folder.display());

    let client = HubClient::from_env(&config.region)?;
    let csv_path = config.csv_path();
    let summary = crate::io::export::export_recommendations(
        &csv_path,
        client.pages(default_filter()),
        config.policy,
    )?;

    report(&config, &csv_path, &summary)
}

/// Print the completion line and, when pages were skipped, an explicit
/// warning so a degraded export is distinguishable from an empty result set.
fn report(config: &ExportConfig, csv_path: &Path, summary: &ExportSummary) -> Result<(), AppError> {
    if !summary.all_pages_ok() {
        eprintln!(
            "warning: skipped {} of {} pages; the export is incomplete",
            summary.pages_failed, summary.pages_total
        );
    }
    println!(
        "Results exported to {} ({} rows)",
        csv_path.display(),
        summary.rows_written
    );
    if config.summary_json {
        let json = serde_json::to_string(summary)
            .map_err(|e| AppError::new(2, format!("Failed to encode summary: {e}")))?;
        println!("{json}");
    }
    Ok(())
}
