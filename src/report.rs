//! Per-sample quality control reports.
//!
//! # Overview
//!
//! A report has one [`SampleMetricsRow`] per sample and a fixed, ordered set
//! of [`Column`]s. Reports are built from three kinds of input:
//!
//! * FASTQC results alone ([`fastqc_report`]),
//! * alignment statistics alone ([`alignment_report`]), or
//! * both, outer-joined on the sample name ([`combined_report`]).
//!
//! Metrics that a pipeline cannot supply are held as
//! [`Metric::Unavailable`] rather than zero. Each configured threshold that a
//! sample falls below is recorded in the sample's notes, and any sample with
//! notes is given the caller's status marker.

pub mod annotate;
pub mod build;
pub mod column;
pub mod merge;
pub mod metric;
pub mod plot;
pub mod table;

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use tracing::warn;

pub use self::annotate::{ThresholdScope, Thresholds};
pub use self::build::{alignment_report, combined_report, fastqc_report};
pub use self::column::{Cell, Column};
pub use self::metric::{Metric, UNAVAILABLE};
pub use self::table::{OutputFormat, Report};

/// The status marker used when the caller does not provide one.
pub const DEFAULT_STATUS_MARKER: &str = "CHECK";

/// A single sample's metrics. Every table produced by this crate, from the
/// intermediate FASTQC and alignment tables to the final report, is a list of
/// these rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleMetricsRow {
    /// The name of the sample.
    pub sample_name: String,

    /// The total number of sequences reported by FASTQC.
    pub fastqc_total_reads: Metric,

    /// The total number of input reads.
    pub total_reads: Metric,

    /// The number of aligned reads.
    pub aligned_reads: Metric,

    /// The number of uniquely aligned reads.
    pub uniquely_aligned_reads: Metric,

    /// Aligned reads as a percentage of total reads.
    pub percent_aligned: Metric,

    /// Uniquely aligned reads as a percentage of total reads.
    pub percent_unique_aligned: Metric,

    /// FASTQC check results of interest, each as `"<LEVEL>: <check name>"`.
    pub fastqc_messages: Vec<String>,

    /// Comma-separated failure annotations.
    pub notes: String,

    /// The status marker if there are any notes, otherwise empty.
    pub status: String,
}

impl SampleMetricsRow {
    /// Creates a new [`SampleMetricsRow`] where every metric is unavailable.
    pub fn new(sample_name: impl Into<String>) -> Self {
        SampleMetricsRow {
            sample_name: sample_name.into(),
            ..Default::default()
        }
    }
}

impl merge::Keyed for SampleMetricsRow {
    fn sample_name(&self) -> &str {
        &self.sample_name
    }
}

/// Settings shared by every report builder.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryOptions {
    /// FASTQC checks that should be reported when they WARN or FAIL.
    pub labels_of_interest: Vec<String>,

    /// Minimum values for each metric.
    pub thresholds: Thresholds,

    /// How unavailable values affect threshold comparisons.
    pub threshold_scope: ThresholdScope,

    /// The status assigned to any sample with notes.
    pub status_marker: String,
}

impl SummaryOptions {
    /// Creates a new [`SummaryOptions`].
    pub fn new(
        labels_of_interest: Vec<String>,
        thresholds: Thresholds,
        threshold_scope: ThresholdScope,
        status_marker: impl Into<String>,
    ) -> Self {
        SummaryOptions {
            labels_of_interest,
            thresholds,
            threshold_scope,
            status_marker: status_marker.into(),
        }
    }
}

/// Non-fatal anomalies encountered while building a report. Each warning is
/// logged when it is created and kept on the resulting [`Report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// No input files were found.
    EmptyResult {
        /// What was being searched for.
        what: &'static str,

        /// The directory that was searched.
        directory: PathBuf,
    },

    /// Joining two sources did not line up 1:1 on sample name.
    MergeMismatch {
        /// The number of rows after joining.
        merged: usize,

        /// The number of rows in the FASTQC input.
        expected: usize,
    },

    /// The same sample name appeared more than once in a single source.
    DuplicateSample {
        /// The repeated sample name.
        sample_name: String,
    },
}

impl Warning {
    fn emit(self) -> Self {
        warn!("{}", self);
        self
    }

    /// Creates (and logs) a new [`Warning::EmptyResult`].
    pub fn empty_result(what: &'static str, directory: &Path) -> Self {
        Warning::EmptyResult {
            what,
            directory: directory.to_path_buf(),
        }
        .emit()
    }

    /// Creates (and logs) a new [`Warning::MergeMismatch`].
    pub fn merge_mismatch(merged: usize, expected: usize) -> Self {
        Warning::MergeMismatch { merged, expected }.emit()
    }

    /// Creates (and logs) a new [`Warning::DuplicateSample`].
    pub fn duplicate_sample(sample_name: &str) -> Self {
        Warning::DuplicateSample {
            sample_name: sample_name.to_string(),
        }
        .emit()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptyResult { what, directory } => {
                write!(f, "no {} were found in directory {:?}", what, directory)
            }
            Warning::MergeMismatch { merged, expected } => write!(
                f,
                "fastqc and alignment statistics cannot be merged 1:1 on sample name \
                ({} merged rows, {} FASTQC rows)",
                merged, expected
            ),
            Warning::DuplicateSample { sample_name } => {
                write!(f, "sample name {:?} appears more than once", sample_name)
            }
        }
    }
}
