//! Streaming CSV export of recommendation pages.
//!
//! Rows are written as pages arrive rather than buffered, so memory use stays
//! flat regardless of result-set size. The flip side: a fail-fast abort
//! mid-stream leaves a truncated file behind.

use std::fs::File;
use std::path::Path;

use crate::domain::{ExportSummary, Page, PagePolicy, Recommendation};
use crate::error::AppError;

/// Column order of the output file. [`to_row`] must stay in sync.
pub const HEADER: [&str; 21] = [
    "Account ID",
    "Action Type",
    "Currency Code",
    "Current Resource Summary",
    "Current Resource Type",
    "Estimated Monthly Cost",
    "Estimated Monthly Savings",
    "Estimated Savings Percentage",
    "Implementation Effort",
    "Last Refresh Timestamp",
    "Recommendation ID",
    "Recommendation Lookback Period In Days",
    "Recommended Resource Summary",
    "Recommended Resource Type",
    "Region",
    "Resource ARN",
    "Resource ID",
    "Restart Needed",
    "Rollback Possible",
    "Source",
    "Tags",
];

/// Flatten one record into its 21 cells, in header order.
///
/// Values pass through in their native textual form; absent fields become
/// empty cells.
pub fn to_row(rec: &Recommendation) -> [String; 21] {
    fn cell<T: ToString>(v: &Option<T>) -> String {
        v.as_ref().map(T::to_string).unwrap_or_default()
    }
    [
        cell(&rec.account_id),
        cell(&rec.action_type),
        cell(&rec.currency_code),
        cell(&rec.current_resource_summary),
        cell(&rec.current_resource_type),
        cell(&rec.estimated_monthly_cost),
        cell(&rec.estimated_monthly_savings),
        cell(&rec.estimated_savings_percentage),
        cell(&rec.implementation_effort),
        cell(&rec.last_refresh_timestamp),
        cell(&rec.recommendation_id),
        cell(&rec.recommendation_lookback_period_in_days),
        cell(&rec.recommended_resource_summary),
        cell(&rec.recommended_resource_type),
        cell(&rec.region),
        cell(&rec.resource_arn),
        cell(&rec.resource_id),
        cell(&rec.restart_needed),
        cell(&rec.rollback_possible),
        cell(&rec.source),
        cell(&rec.tags),
    ]
}

/// Write header + rows for every page the iterator produces.
///
/// The destination is created fresh (truncating any prior file), so repeated
/// runs over the same upstream data are byte-identical. Page errors honor
/// `policy`: `Skip` counts the page and keeps going, `FailFast` returns the
/// page's error. Rows keep API arrival order; no sorting or deduplication.
pub fn export_recommendations(
    path: &Path,
    pages: impl Iterator<Item = Result<Page, AppError>>,
    policy: PagePolicy,
) -> Result<ExportSummary, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::new(2, format!("Failed to write CSV header: {e}")))?;

    let mut summary = ExportSummary::default();
    for page in pages {
        summary.pages_total += 1;
        match page {
            Ok(page) => {
                for rec in &page.records {
                    writer
                        .write_record(to_row(rec))
                        .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
                    summary.rows_written += 1;
                }
            }
            Err(err) => match policy {
                PagePolicy::FailFast => return Err(err),
                PagePolicy::Skip => summary.pages_failed += 1,
            },
        }
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV '{}': {e}", path.display())))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn rec(id: &str) -> Recommendation {
        Recommendation {
            recommendation_id: Some(id.to_string()),
            account_id: Some("123456789012".to_string()),
            ..Default::default()
        }
    }

    fn page(index: usize, ids: &[&str]) -> Result<Page, AppError> {
        Ok(Page {
            index,
            records: ids.iter().map(|id| rec(id)).collect(),
        })
    }

    fn page_error() -> Result<Page, AppError> {
        Err(AppError::new(4, "ListRecommendations failed: boom"))
    }

    fn tmp_csv(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("out.csv")
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn header_and_row_have_twenty_one_cells() {
        assert_eq!(HEADER.len(), 21);
        let row = to_row(&Recommendation::default());
        assert_eq!(row.len(), 21);
        assert!(row.iter().all(String::is_empty));
    }

    #[test]
    fn zero_pages_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = tmp_csv(&dir);

        let summary =
            export_recommendations(&path, std::iter::empty(), PagePolicy::Skip).unwrap();
        assert_eq!(summary, ExportSummary::default());

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].split(',').count(), 21);
        assert!(lines[0].starts_with("Account ID,"));
        assert!(lines[0].ends_with(",Tags"));
    }

    #[test]
    fn missing_fields_become_empty_cells_in_place() {
        let record = Recommendation {
            account_id: Some("123456789012".to_string()),
            action_type: Some("Stop".to_string()),
            estimated_monthly_savings: Some(12.5),
            restart_needed: Some(false),
            ..Default::default()
        };
        let row = to_row(&record);
        assert_eq!(row[0], "123456789012");
        assert_eq!(row[1], "Stop");
        assert_eq!(row[2], ""); // currency code absent
        assert_eq!(row[6], "12.5");
        assert_eq!(row[17], "false");
        assert_eq!(row[20], "");
    }

    #[test]
    fn failed_page_is_skipped_and_counted() {
        let dir = tempfile::tempdir().unwrap();
        let path = tmp_csv(&dir);

        let pages = vec![page(0, &["a", "b"]), page_error(), page(2, &["c"])];
        let summary =
            export_recommendations(&path, pages.into_iter(), PagePolicy::Skip).unwrap();

        assert_eq!(summary.pages_total, 3);
        assert_eq!(summary.pages_failed, 1);
        assert_eq!(summary.rows_written, 3);
        assert!(!summary.all_pages_ok());

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 4);
        // Surviving rows keep original relative order.
        assert!(lines[1].contains(",a,"));
        assert!(lines[2].contains(",b,"));
        assert!(lines[3].contains(",c,"));
    }

    #[test]
    fn fail_fast_aborts_on_the_first_failed_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = tmp_csv(&dir);

        let pages = vec![page(0, &["a"]), page_error(), page(2, &["c"])];
        let err =
            export_recommendations(&path, pages.into_iter(), PagePolicy::FailFast).unwrap_err();
        assert_eq!(err.exit_code(), 4);

        // Rows flushed before the abort may remain; the file must still exist.
        assert!(path.exists());
    }

    #[test]
    fn degraded_tail_matches_the_original_two_page_scenario() {
        // Upstream returns two pages: the first succeeds with 2 items, the
        // second fails. Output: header + exactly the 2 rows from page one.
        let dir = tempfile::tempdir().unwrap();
        let path = tmp_csv(&dir);

        let pages = vec![page(0, &["a", "b"]), page_error()];
        let summary =
            export_recommendations(&path, pages.into_iter(), PagePolicy::Skip).unwrap();

        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.pages_failed, 1);
        assert_eq!(read_lines(&path).len(), 3);
    }

    #[test]
    fn repeated_runs_produce_byte_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = tmp_csv(&dir);

        let pages = || vec![page(0, &["a", "b"]), page(1, &["c"])];
        export_recommendations(&path, pages().into_iter(), PagePolicy::Skip).unwrap();
        let first = fs::read(&path).unwrap();
        export_recommendations(&path, pages().into_iter(), PagePolicy::Skip).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn cells_with_commas_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = tmp_csv(&dir);

        let record = Recommendation {
            current_resource_summary: Some("t3.large, 2 vCPU".to_string()),
            ..Default::default()
        };
        let pages = vec![Ok(Page {
            index: 0,
            records: vec![record],
        })];
        export_recommendations(&path, pages.into_iter(), PagePolicy::Skip).unwrap();

        let lines = read_lines(&path);
        assert!(lines[1].contains("\"t3.large, 2 vCPU\""));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.len(), 21);
        assert_eq!(&row[3], "t3.large, 2 vCPU");
    }
}
