//! Parsing of Kallisto per-sample counts tables.

use std::path::Path;

use tracing::debug;

use super::{AlignmentStatsParser, Pipeline};
use crate::errors::{Error, Result};
use crate::report::{Metric, SampleMetricsRow};
use crate::utils::path::{glob_within, FileNameStr};

/// Pattern matching each sample's counts table.
pub const COUNTS_PATTERN: &str = "*_counts.txt";

/// The combined counts table, which is not a sample.
pub const ALL_GENE_COUNTS: &str = "all_gene_counts.txt";

/// The column that must be populated for a row to be counted.
pub const GENE_COLUMN: &str = "gene";

/// The (zero-based) column holding each row's count.
pub const COUNT_COLUMN_INDEX: usize = 3;

/// Values that mark a missing cell.
const MISSING_VALUES: &[&str] = &["", "NA", "N/A", "NaN", "nan", "NULL", "null"];

fn is_missing(value: &str) -> bool {
    MISSING_VALUES.contains(&value.trim())
}

/// Reads a single counts table, returning the sample name and the sum of the
/// count column over every row that names a gene.
///
/// The sample name is the basename of the last column header.
pub fn read_counts_table(path: &Path) -> Result<(String, f64)> {
    let location = path.display().to_string();
    let table_error = |source| Error::Table {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)
        .map_err(table_error)?;

    let headers = reader.headers().map_err(table_error)?.clone();
    if headers.len() <= COUNT_COLUMN_INDEX {
        return Err(Error::source_format(
            location,
            format!(
                "expected at least {} columns, found {}",
                COUNT_COLUMN_INDEX + 1,
                headers.len()
            ),
        ));
    }

    let gene_index = headers
        .iter()
        .position(|h| h.trim() == GENE_COLUMN)
        .ok_or_else(|| {
            Error::source_format(&location, format!("missing '{}' column", GENE_COLUMN))
        })?;

    let sample_name = headers
        .iter()
        .last()
        .and_then(|h| h.trim().rsplit('/').next())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::source_format(&location, "last column header is empty"))?
        .to_string();

    let mut total = 0.0;
    for result in reader.records() {
        let record = result.map_err(table_error)?;

        if record.get(gene_index).map_or(true, is_missing) {
            continue;
        }

        let raw = record.get(COUNT_COLUMN_INDEX).unwrap_or("");
        if is_missing(raw) {
            continue;
        }

        total += raw.trim().parse::<f64>().map_err(|_| {
            let line = record.position().map_or(0, |p| p.line());
            Error::source_format(
                &location,
                format!("line {}: count is not numeric: '{}'", line, raw),
            )
        })?;
    }

    Ok((sample_name, total))
}

/// Parser for Kallisto output: one [`COUNTS_PATTERN`] table per sample in
/// the output directory. Kallisto does not distinguish unique from total
/// alignments, so only aligned reads are populated.
pub struct KallistoParser;

impl AlignmentStatsParser for KallistoParser {
    fn pipeline(&self) -> Pipeline {
        Pipeline::Kallisto
    }

    fn parse(&self, output_dir: &Path) -> Result<Vec<SampleMetricsRow>> {
        let mut rows = Vec::new();

        for path in glob_within(output_dir, COUNTS_PATTERN)? {
            if path.file_name_str() == Some(ALL_GENE_COUNTS) {
                continue;
            }

            let (sample_name, aligned) = read_counts_table(&path)?;
            debug!("  [*] {}: {}", sample_name, path.display());

            let mut row = SampleMetricsRow::new(sample_name);
            row.aligned_reads = Metric::Value(aligned);
            rows.push(row);
        }

        Ok(rows)
    }
}
