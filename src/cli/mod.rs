//! Command-line parsing for the Cost Optimization Hub exporter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! export pipeline. Every option can also come from the environment (a `.env`
//! file is honored), so the tool still works in a flag-less cron invocation.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::PagePolicy;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "coh-export",
    version,
    about = "Export AWS Cost Optimization Hub recommendations to a per-client CSV"
)]
pub struct Cli {
    /// Client name; becomes the output folder and the CSV file prefix.
    #[arg(long, env = "COH_CLIENT_NAME")]
    pub client_name: String,

    /// Local root directory under which exports are written.
    #[arg(long, env = "COH_LOCAL_ROOT", default_value = "./exports")]
    pub local_root: PathBuf,

    /// AWS region for the Cost Optimization Hub endpoint.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// What to do when a single page fetch fails.
    #[arg(long, value_enum, default_value = "skip")]
    pub on_page_error: PagePolicy,

    /// Print the export summary as JSON on stdout.
    #[arg(long)]
    pub summary_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn page_policy_defaults_to_skip() {
        let cli = Cli::parse_from(["coh-export", "--client-name", "Acme"]);
        assert_eq!(cli.on_page_error, PagePolicy::Skip);
        assert!(!cli.summary_json);
    }

    #[test]
    fn fail_fast_is_selectable() {
        let cli = Cli::parse_from([
            "coh-export",
            "--client-name",
            "Acme",
            "--on-page-error",
            "fail-fast",
        ]);
        assert_eq!(cli.on_page_error, PagePolicy::FailFast);
    }
}
