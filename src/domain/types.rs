//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the data layer without leaking AWS SDK types into the rest of
//!   the crate
//! - rendered to CSV rows or to a JSON summary

use clap::ValueEnum;
use serde::Serialize;

/// One flattened cost-optimization recommendation.
///
/// Every field is optional: the listing API omits fields freely, and an absent
/// field becomes an empty CSV cell rather than an error. Values keep whatever
/// textual form the source gave them; no coercion happens downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendation {
    pub account_id: Option<String>,
    pub action_type: Option<String>,
    pub currency_code: Option<String>,
    pub current_resource_summary: Option<String>,
    pub current_resource_type: Option<String>,
    pub estimated_monthly_cost: Option<f64>,
    pub estimated_monthly_savings: Option<f64>,
    pub estimated_savings_percentage: Option<f64>,
    pub implementation_effort: Option<String>,
    pub last_refresh_timestamp: Option<String>,
    pub recommendation_id: Option<String>,
    pub recommendation_lookback_period_in_days: Option<i32>,
    pub recommended_resource_summary: Option<String>,
    pub recommended_resource_type: Option<String>,
    pub region: Option<String>,
    pub resource_arn: Option<String>,
    pub resource_id: Option<String>,
    pub restart_needed: Option<bool>,
    pub rollback_possible: Option<bool>,
    pub source: Option<String>,
    /// Resource tags flattened to `key=value` pairs joined with `;`.
    pub tags: Option<String>,
}

/// One page of listing results, records in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Zero-based fetch order of the page.
    pub index: usize,
    pub records: Vec<Recommendation>,
}

/// What to do when a single page fetch fails.
///
/// The original workflow silently dropped failed pages; `Skip` keeps that
/// tolerance but counts the loss, `FailFast` turns it into a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PagePolicy {
    /// Skip the failed page, count it, and keep writing the remaining pages.
    Skip,
    /// Abort the export on the first failed page.
    FailFast,
}

/// Outcome of one export run.
///
/// `pages_failed > 0` means the output file is well-formed but incomplete;
/// callers can no longer confuse a degraded response with an empty result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub pages_total: usize,
    pub pages_failed: usize,
    pub rows_written: usize,
}

impl ExportSummary {
    pub fn all_pages_ok(&self) -> bool {
        self.pages_failed == 0
    }
}
