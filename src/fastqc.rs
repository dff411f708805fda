//! Summaries of FASTQC results.
//!
//! Two facts are gathered for each sample: the total number of sequences
//! (from `fastqc_data.txt`) and the checks of interest that did not pass
//! (from `summary.txt`). Each is gathered by an independent pass over the
//! results directory, and the two passes are outer-joined on sample name.

pub mod command;
pub mod parse;
pub mod scan;

use std::path::Path;

use tracing::debug;

use crate::errors::Result;
use crate::report::merge::{outer_join, Keyed};
use crate::report::{Metric, Warning};

use self::parse::{CheckStatusParser, TotalSequencesParser};

/// Every check FASTQC reports in `summary.txt`.
pub const FASTQC_SUMMARY_LABELS: &[&str] = &[
    "Basic Statistics",
    "Per base sequence quality",
    "Per tile sequence quality",
    "Per sequence quality scores",
    "Per base sequence content",
    "Per sequence GC content",
    "Per base N content",
    "Sequence Length Distribution",
    "Sequence Duplication Levels",
    "Overrepresented sequences",
    "Adapter Content",
    "Kmer Content",
];

/// The facts gathered from FASTQC for a single sample.
#[derive(Clone, Debug, PartialEq)]
pub struct FastqcRecord {
    /// The name of the sample.
    pub sample_name: String,

    /// The total number of sequences FASTQC saw.
    pub total_sequences: Metric,

    /// Checks of interest that did not pass, as `"<LEVEL>: <check name>"`.
    pub messages: Vec<String>,
}

impl Keyed for FastqcRecord {
    fn sample_name(&self) -> &str {
        &self.sample_name
    }
}

/// Gathers the total number of sequences for every sample below
/// `results_dir`.
pub fn total_sequences(results_dir: &Path) -> Result<Vec<FastqcRecord>> {
    scan::scan(results_dir, &TotalSequencesParser)
}

/// Gathers the failing and warning checks of interest for every sample below
/// `results_dir`.
pub fn check_statuses(
    results_dir: &Path,
    labels_of_interest: &[String],
) -> Result<Vec<FastqcRecord>> {
    scan::scan(results_dir, &CheckStatusParser::new(labels_of_interest))
}

/// Gathers both facts for every sample below `results_dir`, one record per
/// sample, ordered by sample name. A sample found by only one of the two
/// passes still gets a record: its missing facts are left unavailable (or
/// empty, for messages).
pub fn collect(
    results_dir: &Path,
    labels_of_interest: &[String],
) -> Result<(Vec<FastqcRecord>, Vec<Warning>)> {
    debug!("Collecting FASTQC results from {}.", results_dir.display());

    let statuses = check_statuses(results_dir, labels_of_interest)?;
    let totals = total_sequences(results_dir)?;

    let joined = outer_join(statuses, totals);
    let mut warnings = joined.warnings;

    let records: Vec<FastqcRecord> = joined
        .rows
        .into_iter()
        .map(|row| FastqcRecord {
            sample_name: row.sample_name,
            total_sequences: row
                .right
                .map(|r| r.total_sequences)
                .unwrap_or(Metric::Unavailable),
            messages: row.left.map(|r| r.messages).unwrap_or_default(),
        })
        .collect();

    if records.is_empty() {
        warnings.push(Warning::empty_result("FASTQC results", results_dir));
    }

    Ok((records, warnings))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::scan::tests::{fastqc_data, summary, write_result_dir, write_result_zip};
    use super::*;

    fn labels() -> Vec<String> {
        vec![
            String::from("Per base sequence quality"),
            String::from("Per tile sequence quality"),
            String::from("Per sequence quality scores"),
            String::from("Overrepresented sequences"),
        ]
    }

    #[test]
    fn test_collect_joins_both_passes() {
        let root = tempfile::tempdir().unwrap();
        write_result_dir(
            root.path(),
            "ARH1_S1",
            &fastqc_data("ARH1_S1", 32_416_013),
            &summary(
                "ARH1_S1",
                &[
                    ("PASS", "Basic Statistics"),
                    ("FAIL", "Per tile sequence quality"),
                    ("WARN", "Overrepresented sequences"),
                ],
            ),
        );
        write_result_zip(
            root.path(),
            "ARH3_S3",
            &fastqc_data("ARH3_S3", 37_658_828),
            &summary(
                "ARH3_S3",
                &[
                    ("FAIL", "Per tile sequence quality"),
                    ("FAIL", "Per sequence quality scores"),
                    ("WARN", "Overrepresented sequences"),
                    ("FAIL", "Kmer Content"),
                ],
            ),
        );

        let (records, warnings) = collect(root.path(), &labels()).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(
            records,
            vec![
                FastqcRecord {
                    sample_name: String::from("ARH1_S1"),
                    total_sequences: Metric::Value(32_416_013.0),
                    messages: vec![
                        String::from("FAIL: Per tile sequence quality"),
                        String::from("WARN: Overrepresented sequences"),
                    ],
                },
                FastqcRecord {
                    sample_name: String::from("ARH3_S3"),
                    total_sequences: Metric::Value(37_658_828.0),
                    messages: vec![
                        String::from("FAIL: Per tile sequence quality"),
                        String::from("FAIL: Per sequence quality scores"),
                        String::from("WARN: Overrepresented sequences"),
                    ],
                },
            ]
        );
    }

    #[test]
    fn test_collect_sample_missing_from_one_pass() {
        let root = tempfile::tempdir().unwrap();

        // An empty summary yields no record from the status pass.
        write_result_dir(root.path(), "ARH1_S1", &fastqc_data("ARH1_S1", 100), "");

        let (records, _) = collect(root.path(), &labels()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_sequences, Metric::Value(100.0));
        assert!(records[0].messages.is_empty());
    }

    #[test]
    fn test_collect_empty_directory_warns() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("unrelated")).unwrap();

        let (records, warnings) = collect(root.path(), &labels()).unwrap();
        assert!(records.is_empty());
        assert_eq!(
            warnings,
            vec![Warning::EmptyResult {
                what: "FASTQC results",
                directory: root.path().to_path_buf(),
            }]
        );
    }

    #[test]
    fn test_collect_duplicate_encodings_warn() {
        let root = tempfile::tempdir().unwrap();
        let data = fastqc_data("ARH1_S1", 100);
        let summary = summary("ARH1_S1", &[("PASS", "Basic Statistics")]);
        write_result_dir(root.path(), "ARH1_S1", &data, &summary);
        write_result_zip(root.path(), "ARH1_S1", &data, &summary);

        let (records, warnings) = collect(root.path(), &labels()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            warnings,
            vec![
                Warning::DuplicateSample {
                    sample_name: String::from("ARH1_S1")
                },
                Warning::DuplicateSample {
                    sample_name: String::from("ARH1_S1")
                },
            ]
        );
    }
}
