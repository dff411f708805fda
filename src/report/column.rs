//! The named columns that can appear in a report.

use std::fmt;

use serde::Serialize;

use super::metric::Metric;
use super::SampleMetricsRow;

/// A column within a report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    /// The sample name.
    Sample,

    /// The total number of sequences reported by FASTQC.
    FastqcTotalReads,

    /// The total number of input reads.
    TotalReads,

    /// The number of aligned reads.
    AlignedReads,

    /// The number of uniquely aligned reads.
    UniquelyAlignedReads,

    /// Aligned reads as a percentage of total reads.
    PercentAligned,

    /// Uniquely aligned reads as a percentage of total reads.
    PercentUniquelyAligned,

    /// Every failure annotation for the sample.
    Notes,

    /// The status marker, set whenever there are notes.
    Status,
}

/// The value held by a single cell in a report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell<'a> {
    /// A free-text cell.
    Text(&'a str),

    /// A numeric cell.
    Metric(Metric),
}

impl Column {
    /// The columns of a FASTQC-only report.
    pub const FASTQC: &'static [Column] = &[
        Column::Sample,
        Column::TotalReads,
        Column::Notes,
        Column::Status,
    ];

    /// The columns of an alignment-only report.
    pub const ALIGNMENT: &'static [Column] = &[
        Column::Sample,
        Column::TotalReads,
        Column::AlignedReads,
        Column::UniquelyAlignedReads,
        Column::PercentAligned,
        Column::PercentUniquelyAligned,
        Column::Notes,
        Column::Status,
    ];

    /// The columns of a combined FASTQC and alignment report.
    pub const COMBINED: &'static [Column] = &[
        Column::Sample,
        Column::FastqcTotalReads,
        Column::TotalReads,
        Column::AlignedReads,
        Column::UniquelyAlignedReads,
        Column::PercentAligned,
        Column::PercentUniquelyAligned,
        Column::Notes,
        Column::Status,
    ];

    /// The header for this column.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Sample => "Sample",
            Column::FastqcTotalReads => "Total Reads (FASTQC)",
            Column::TotalReads => "Total Reads",
            Column::AlignedReads => "Aligned Reads",
            Column::UniquelyAlignedReads => "Uniquely Aligned Reads",
            Column::PercentAligned => "Percent Aligned",
            Column::PercentUniquelyAligned => "Percent Uniquely Aligned",
            Column::Notes => "Notes",
            Column::Status => "Status",
        }
    }

    /// Whether or not this column holds percentages.
    pub fn is_percentage(&self) -> bool {
        matches!(self, Column::PercentAligned | Column::PercentUniquelyAligned)
    }

    /// Pulls the cell for this column out of a row.
    pub fn cell<'a>(&self, row: &'a SampleMetricsRow) -> Cell<'a> {
        match self {
            Column::Sample => Cell::Text(&row.sample_name),
            Column::FastqcTotalReads => Cell::Metric(row.fastqc_total_reads),
            Column::TotalReads => Cell::Metric(row.total_reads),
            Column::AlignedReads => Cell::Metric(row.aligned_reads),
            Column::UniquelyAlignedReads => Cell::Metric(row.uniquely_aligned_reads),
            Column::PercentAligned => Cell::Metric(row.percent_aligned),
            Column::PercentUniquelyAligned => Cell::Metric(row.percent_unique_aligned),
            Column::Notes => Cell::Text(&row.notes),
            Column::Status => Cell::Text(&row.status),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Metric(m) => write!(f, "{}", m),
        }
    }
}
