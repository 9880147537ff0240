// JSON export of comparison results.
//
// Two shapes: the flat per-pair records (url_a, url_b, similarity_score,
// matched_spans) that downstream tools consume, and the full report with
// matrix, diffs, and warnings.

use anyhow::{Context, Result};

use crate::pipeline::ComparisonReport;

/// Per-pair records as a pretty-printed JSON array.
pub fn records_json(report: &ComparisonReport) -> Result<String> {
    serde_json::to_string_pretty(&report.records()).context("Failed to serialize pair records")
}

/// The whole report as pretty-printed JSON.
pub fn report_json(report: &ComparisonReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize comparison report")
}
