//! Parsing of STAR `Log.final.out` reports.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::{AlignmentStatsParser, Pipeline};
use crate::errors::{Error, Result};
use crate::report::{Metric, SampleMetricsRow};
use crate::utils::path::{glob_within, FileNameStr};

/// The name of the summary STAR writes into each sample's directory.
pub const LOG_FINAL_OUT: &str = "Log.final.out";

/// The row holding the total number of input reads.
pub const INPUT_READS_LABEL: &str = "Number of input reads";

/// The row holding the number of uniquely mapped reads.
pub const UNIQUELY_MAPPED_READS_LABEL: &str = "Uniquely mapped reads number";

lazy_static! {
    /// A `label |<TAB>value` row. Section headers have no `|` and never match.
    static ref STAR_ROW_REGEX: Regex =
        Regex::new(r"^\s*(?P<label>[^|]*?)\s*\|\t(?P<value>.*?)\s*$").unwrap();
}

/// A parsed STAR `Log.final.out` report: every `label | value` row, in the
/// order it appeared. Section headers (for example, `UNIQUE READS:`) and
/// blank lines carry no value and are not kept.
#[derive(Debug, Default)]
pub struct StarLog {
    location: String,
    rows: IndexMap<String, String>,
}

impl StarLog {
    /// Parses a `Log.final.out` report. `location` names the report in any
    /// error messages.
    pub fn parse<R: BufRead>(reader: R, location: impl Into<String>) -> Result<Self> {
        let location = location.into();
        let mut rows = IndexMap::new();
        for line in reader.lines() {
            let line = line.map_err(Error::io(&location))?;
            if let Some(caps) = STAR_ROW_REGEX.captures(&line) {
                rows.insert(caps["label"].to_string(), caps["value"].to_string());
            }
        }

        Ok(StarLog { location, rows })
    }

    /// Reads and parses a `Log.final.out` report from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(Error::io(path))?;
        StarLog::parse(BufReader::new(file), path.display().to_string())
    }

    /// Gets the raw value of the first row whose label starts with `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(key, _)| key.starts_with(label))
            .map(|(_, value)| value.as_str())
    }

    /// Gets the numeric value of the first row whose label starts with
    /// `label`. A trailing `%` is ignored.
    pub fn number(&self, label: &str) -> Result<f64> {
        let raw = self.get(label).ok_or_else(|| {
            Error::source_format(&self.location, format!("missing row '{}'", label))
        })?;

        raw.trim_end_matches('%').trim().parse::<f64>().map_err(|_| {
            Error::source_format(
                &self.location,
                format!("row '{}' is not numeric: '{}'", label, raw),
            )
        })
    }

    /// The number of rows in the report.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether or not the report has any rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Builds the alignment statistics for a sample from this report.
    pub fn to_row(&self, sample_name: impl Into<String>) -> Result<SampleMetricsRow> {
        let mut row = SampleMetricsRow::new(sample_name);
        row.total_reads = Metric::Value(self.number(INPUT_READS_LABEL)?);
        row.uniquely_aligned_reads = Metric::Value(self.number(UNIQUELY_MAPPED_READS_LABEL)?);
        Ok(row)
    }
}

/// Parser for STAR + HTSeq output: one subdirectory per sample, each holding
/// a [`LOG_FINAL_OUT`] report.
pub struct StarHtseqParser;

impl AlignmentStatsParser for StarHtseqParser {
    fn pipeline(&self) -> Pipeline {
        Pipeline::StarHtseq
    }

    fn parse(&self, output_dir: &Path) -> Result<Vec<SampleMetricsRow>> {
        let mut rows = Vec::new();

        for path in glob_within(output_dir, &format!("*/{}", LOG_FINAL_OUT))? {
            let sample_name = path
                .parent()
                .and_then(|p| p.file_name_str())
                .ok_or_else(|| Error::NonUtf8Path(path.clone()))?
                .to_string();

            debug!("  [*] {}: {}", sample_name, path.display());
            let log = StarLog::read(&path)?;
            rows.push(log.to_row(sample_name)?);
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const LOG_FINAL_OUT_FIXTURE: &str = "                                 Started job on |\tApr 16 03:25:24
                             Started mapping on |\tApr 16 03:33:31
                                    Finished on |\tApr 16 03:58:18
       Mapping speed, Million of reads per hour |\t78.41

                          Number of input reads |\t32389200
                      Average input read length |\t49
                                    UNIQUE READS:
                   Uniquely mapped reads number |\t28693280
                        Uniquely mapped reads % |\t88.59%
                          Average mapped length |\t49.71
                       Number of splices: Total |\t4838469
                             MULTI-MAPPING READS:
        Number of reads mapped to multiple loci |\t2233606
             % of reads mapped to multiple loci |\t6.90%
                                  CHIMERIC READS:
                       Number of chimeric reads |\t0
                            % of chimeric reads |\t0.00%
";

    #[test]
    fn test_parse_log_final_out() {
        let log = StarLog::parse(LOG_FINAL_OUT_FIXTURE.as_bytes(), "testSample").unwrap();
        assert_eq!(log.len(), 14);
        assert_eq!(log.get("Started job on"), Some("Apr 16 03:25:24"));
        assert_eq!(log.number("Uniquely mapped reads %").unwrap(), 88.59);
        assert_eq!(log.number("Number of splices: Total").unwrap(), 4_838_469.0);

        let row = log.to_row("testSample").unwrap();
        assert_eq!(row.sample_name, "testSample");
        assert_eq!(row.total_reads, Metric::Value(32_389_200.0));
        assert_eq!(row.uniquely_aligned_reads, Metric::Value(28_693_280.0));
        assert_eq!(row.aligned_reads, Metric::Unavailable);
        assert_eq!(row.fastqc_total_reads, Metric::Unavailable);
        assert_eq!(row.percent_aligned, Metric::Unavailable);
        assert_eq!(row.percent_unique_aligned, Metric::Unavailable);
    }

    #[test]
    fn test_missing_row_is_a_format_error() {
        let input = "                          Number of input reads |\t32389200\n";
        let log = StarLog::parse(input.as_bytes(), "broken").unwrap();
        match log.to_row("broken").unwrap_err() {
            Error::SourceFormat { location, reason } => {
                assert_eq!(location, "broken");
                assert!(reason.contains(UNIQUELY_MAPPED_READS_LABEL));
            }
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn test_non_numeric_row_is_a_format_error() {
        let input = "                          Number of input reads |\tmany\n";
        let log = StarLog::parse(input.as_bytes(), "broken").unwrap();
        assert!(matches!(
            log.number(INPUT_READS_LABEL),
            Err(Error::SourceFormat { .. })
        ));
    }

    #[test]
    fn test_parse_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        for sample in ["testSample", "otherSample"] {
            let dir = tmp.path().join(sample);
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join(LOG_FINAL_OUT), LOG_FINAL_OUT_FIXTURE).unwrap();
        }

        // Directories without a report are not samples.
        fs::create_dir(tmp.path().join("_logs")).unwrap();

        let rows = StarHtseqParser.parse(tmp.path()).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.sample_name.as_str()).collect();
        assert_eq!(names, vec!["otherSample", "testSample"]);
    }

    #[test]
    fn test_parse_output_dir_skips_hidden_directories() {
        let tmp = tempfile::tempdir().unwrap();
        for sample in ["testSample", ".snapshot"] {
            let dir = tmp.path().join(sample);
            fs::create_dir(&dir).unwrap();
            fs::write(dir.join(LOG_FINAL_OUT), LOG_FINAL_OUT_FIXTURE).unwrap();
        }

        let rows = StarHtseqParser.parse(tmp.path()).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.sample_name.as_str()).collect();
        assert_eq!(names, vec!["testSample"]);
    }
}
