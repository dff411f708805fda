//! Derivation of percentage metrics and threshold-based annotation.

use std::fmt;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::column::{Cell, Column};
use super::metric::Metric;
use super::SampleMetricsRow;

/// Caller-supplied minimum values for each metric. A sample with a value
/// strictly below a threshold is flagged in the report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum number of total reads.
    pub total_reads: Option<f64>,

    /// Minimum number of aligned reads.
    pub aligned_reads: Option<f64>,

    /// Minimum number of uniquely aligned reads.
    pub uniquely_aligned_reads: Option<f64>,

    /// Minimum percentage of aligned reads.
    pub percent_aligned: Option<f64>,

    /// Minimum percentage of uniquely aligned reads.
    pub percent_unique_aligned: Option<f64>,
}

impl Thresholds {
    /// Gets every threshold that has been set, paired with the column it
    /// applies to, in report order.
    pub fn checks(&self) -> Vec<(Column, f64)> {
        [
            (Column::TotalReads, self.total_reads),
            (Column::AlignedReads, self.aligned_reads),
            (Column::UniquelyAlignedReads, self.uniquely_aligned_reads),
            (Column::PercentAligned, self.percent_aligned),
            (Column::PercentUniquelyAligned, self.percent_unique_aligned),
        ]
        .into_iter()
        .filter_map(|(column, threshold)| threshold.map(|t| (column, t)))
        .collect()
    }
}

/// How an unavailable metric affects threshold comparisons.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdScope {
    /// If any sample's metric is unavailable, no sample is compared against
    /// that metric's threshold.
    Column,

    /// Only samples whose metric is unavailable skip the comparison.
    #[default]
    Row,
}

impl fmt::Display for ThresholdScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column => write!(f, "column"),
            Self::Row => write!(f, "row"),
        }
    }
}

/// The message recorded when a sample falls below a threshold.
pub fn below_threshold_message(column: Column) -> String {
    format!("Below {} threshold", column.name())
}

/// Fills in the percentage columns of each row from its raw counts.
pub fn add_percentages(rows: &mut [SampleMetricsRow]) {
    for row in rows {
        row.percent_aligned = row.aligned_reads.percent_of(row.total_reads);
        row.percent_unique_aligned = row.uniquely_aligned_reads.percent_of(row.total_reads);
    }
}

/// Compares a single column against a threshold, returning one message
/// (possibly empty) per row.
pub fn column_messages(
    rows: &[SampleMetricsRow],
    column: Column,
    threshold: f64,
    scope: ThresholdScope,
) -> Vec<String> {
    let values = rows
        .iter()
        .map(|row| match column.cell(row) {
            Cell::Metric(m) => m,
            Cell::Text(_) => Metric::Unavailable,
        })
        .collect_vec();

    if scope == ThresholdScope::Column && values.iter().any(|m| !m.is_available()) {
        debug!(
            "  [*] Skipping the {} threshold: the column has unavailable values.",
            column
        );
        return vec![String::new(); rows.len()];
    }

    values
        .into_iter()
        .map(|m| match m {
            Metric::Value(v) if v < threshold => below_threshold_message(column),
            _ => String::new(),
        })
        .collect()
}

/// Evaluates every configured threshold, returning the messages for each row
/// in threshold order.
pub fn threshold_messages(
    rows: &[SampleMetricsRow],
    checks: &[(Column, f64)],
    scope: ThresholdScope,
) -> Vec<Vec<String>> {
    let mut result = vec![Vec::new(); rows.len()];

    for (column, threshold) in checks {
        let messages = column_messages(rows, *column, *threshold, scope);
        for (row_messages, message) in result.iter_mut().zip(messages) {
            row_messages.push(message);
        }
    }

    result
}

/// Joins all non-empty messages into the row's notes and sets the status
/// marker if any notes were recorded.
pub fn set_notes_and_status<I, S>(row: &mut SampleMetricsRow, messages: I, status_marker: &str)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    row.notes = messages
        .into_iter()
        .filter(|m| !m.as_ref().is_empty())
        .map(|m| m.as_ref().to_string())
        .join(", ");

    row.status = if row.notes.is_empty() {
        String::new()
    } else {
        status_marker.to_string()
    };
}
