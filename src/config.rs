//! Run configuration.
//!
//! The original workflow kept the client name and output root as process-wide
//! constants; here they form an immutable [`ExportConfig`] built once at
//! startup from CLI flags and environment variables, then passed through the
//! pipeline.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::cli::Cli;
use crate::domain::PagePolicy;
use crate::error::AppError;

/// Immutable configuration for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub client_name: String,
    pub local_root: PathBuf,
    /// Year-month folder tag, always six digits (`YYYYMM`).
    pub period_tag: String,
    pub region: String,
    pub policy: PagePolicy,
    pub summary_json: bool,
}

impl ExportConfig {
    /// Build the configuration from parsed CLI arguments and today's date.
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli, chrono::Local::now().date_naive())
    }

    /// Build the configuration for an explicit run date.
    pub fn new(cli: &Cli, run_date: NaiveDate) -> Self {
        Self {
            client_name: cli.client_name.clone(),
            local_root: cli.local_root.clone(),
            period_tag: run_date.format("%Y%m").to_string(),
            region: cli.region.clone(),
            policy: cli.on_page_error,
            summary_json: cli.summary_json,
        }
    }

    /// Folder the CSV lands in: `{local_root}/{client_name}/{period_tag}`.
    pub fn output_dir(&self) -> PathBuf {
        self.local_root.join(&self.client_name).join(&self.period_tag)
    }

    /// Full path of the output file:
    /// `{output_dir}/{client_name}_recommendations.csv`.
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir()
            .join(format!("{}_recommendations.csv", self.client_name))
    }

    /// Create the output directory (and any missing parents).
    ///
    /// Idempotent: succeeds if the directory already exists. Fails before any
    /// network call is made, so a bad output root never costs an API round
    /// trip.
    pub fn ensure_output_dir(&self) -> Result<PathBuf, AppError> {
        let dir = self.output_dir();
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::new(
                2,
                format!("Failed to create output directory '{}': {e}", dir.display()),
            )
        })?;
        Ok(dir)
    }
}
