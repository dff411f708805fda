//! Line-by-line parsing of the text reports inside a FASTQC result.

use crate::errors::{Error, Result};
use crate::report::Metric;

use super::FastqcRecord;

/// The suffix stripped from FASTQ filenames to get the sample name.
pub const FASTQ_GZ_SUFFIX: &str = ".fastq.gz";

/// Derives a sample name from the FASTQ filename FASTQC reports.
///
/// ```
/// use qcreport::fastqc::parse::sample_from_filename;
///
/// assert_eq!(sample_from_filename("ARH1_S1.fastq.gz"), "ARH1_S1");
/// assert_eq!(sample_from_filename(" ARH1_S1.fastq.gz\n"), "ARH1_S1");
/// ```
pub fn sample_from_filename(filename: &str) -> String {
    let trimmed = filename.trim();
    trimmed
        .strip_suffix(FASTQ_GZ_SUFFIX)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// The facts gathered so far from a single report.
#[derive(Debug, Default, PartialEq)]
pub struct PartialRecord {
    /// The sample name, once it has been seen.
    pub sample_name: Option<String>,

    /// The total number of sequences, once it has been seen.
    pub total_sequences: Option<f64>,

    /// FASTQC check messages of interest.
    pub messages: Vec<String>,
}

impl PartialRecord {
    /// Whether or not nothing has been gathered.
    pub fn is_empty(&self) -> bool {
        self.sample_name.is_none() && self.total_sequences.is_none() && self.messages.is_empty()
    }

    /// Finishes the record once the whole report has been read. A report
    /// that yielded nothing produces no record; one that yielded facts but
    /// never named its sample is malformed.
    pub fn finish(self, location: &str) -> Result<Option<FastqcRecord>> {
        if self.is_empty() {
            return Ok(None);
        }

        let sample_name = self
            .sample_name
            .ok_or_else(|| Error::source_format(location, "no sample filename was found"))?;

        Ok(Some(FastqcRecord {
            sample_name,
            total_sequences: Metric::from(self.total_sequences),
            messages: self.messages,
        }))
    }
}

/// A parser for one of the text reports within a FASTQC result.
pub trait FastqcReportParser {
    /// The name of the report within each `<sample>_fastqc` result.
    fn file_name(&self) -> &'static str;

    /// Gathers whatever facts a single line holds into `record`.
    fn parse_line(&self, line: &str, record: &mut PartialRecord, location: &str) -> Result<()>;
}

/// Gathers the sample name and total sequence count from `fastqc_data.txt`.
pub struct TotalSequencesParser;

impl TotalSequencesParser {
    const FILENAME: &'static str = "Filename";
    const TOTAL_SEQUENCES: &'static str = "Total Sequences";
}

impl FastqcReportParser for TotalSequencesParser {
    fn file_name(&self) -> &'static str {
        "fastqc_data.txt"
    }

    fn parse_line(&self, line: &str, record: &mut PartialRecord, location: &str) -> Result<()> {
        if let Some(rest) = line.strip_prefix(Self::FILENAME) {
            record.sample_name = Some(sample_from_filename(rest));
        }

        if let Some(rest) = line.strip_prefix(Self::TOTAL_SEQUENCES) {
            let total = rest.trim().parse::<u64>().map_err(|_| {
                Error::source_format(
                    location,
                    format!("'{}' is not a count: '{}'", Self::TOTAL_SEQUENCES, rest.trim()),
                )
            })?;
            record.total_sequences = Some(total as f64);
        }

        Ok(())
    }
}

/// Gathers the sample name and any FAIL or WARN results for checks of
/// interest from `summary.txt`.
pub struct CheckStatusParser<'a> {
    labels_of_interest: &'a [String],
}

impl<'a> CheckStatusParser<'a> {
    /// Creates a new [`CheckStatusParser`] that only records the checks
    /// named in `labels_of_interest`.
    pub fn new(labels_of_interest: &'a [String]) -> Self {
        CheckStatusParser { labels_of_interest }
    }
}

impl FastqcReportParser for CheckStatusParser<'_> {
    fn file_name(&self) -> &'static str {
        "summary.txt"
    }

    fn parse_line(&self, line: &str, record: &mut PartialRecord, location: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 3 {
            return Err(Error::source_format(
                location,
                format!("expected 3 tab-separated fields, found {}: '{}'", fields.len(), line),
            ));
        }

        let (status, check, filename) = (fields[0], fields[1], fields[2]);

        // Even a passing check establishes the sample name.
        if record.sample_name.is_none() {
            record.sample_name = Some(sample_from_filename(filename));
        }

        if (status == "FAIL" || status == "WARN")
            && self.labels_of_interest.iter().any(|l| l == check)
        {
            record.messages.push(format!("{}: {}", status, check));
        }

        Ok(())
    }
}
