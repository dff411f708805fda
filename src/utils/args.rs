//! Utilities related to the parsing of arguments.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::debug;
use tracing::info;

use crate::fastqc::FASTQC_SUMMARY_LABELS;
use crate::report::{OutputFormat, Report, ThresholdScope, Thresholds, DEFAULT_STATUS_MARKER};

//====================//
// Labels of Interest //
//====================//

/// Command line arguments selecting which FASTQC checks are reported.
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// A FASTQC check to report when it does not pass. May be repeated.
    /// Defaults to every check (see `list labels`).
    #[arg(short = 'l', long = "label", value_name = "CHECK")]
    labels: Vec<String>,
}

impl LabelArgs {
    /// Gets the FASTQC checks of interest, falling back to every known check.
    pub fn labels_of_interest(&self) -> Vec<String> {
        let labels = if self.labels.is_empty() {
            FASTQC_SUMMARY_LABELS.iter().map(|s| s.to_string()).collect()
        } else {
            self.labels.clone()
        };

        debug!("  [*] Labels of interest: {:?}", labels);
        labels
    }
}

//============//
// Thresholds //
//============//

/// Command line arguments for the minimum value of each alignment metric.
#[derive(Args, Debug)]
pub struct ThresholdArgs {
    /// Minimum number of total reads.
    #[arg(long, value_name = "F64")]
    min_total_reads: Option<f64>,

    /// Minimum number of aligned reads.
    #[arg(long, value_name = "F64")]
    min_aligned_reads: Option<f64>,

    /// Minimum number of uniquely aligned reads.
    #[arg(long, value_name = "F64")]
    min_uniquely_aligned_reads: Option<f64>,

    /// Minimum percentage (0-100) of aligned reads.
    #[arg(long, value_name = "F64")]
    min_percent_aligned: Option<f64>,

    /// Minimum percentage (0-100) of uniquely aligned reads.
    #[arg(long, value_name = "F64")]
    min_percent_unique_aligned: Option<f64>,
}

impl From<&ThresholdArgs> for Thresholds {
    fn from(args: &ThresholdArgs) -> Self {
        let thresholds = Thresholds {
            total_reads: args.min_total_reads,
            aligned_reads: args.min_aligned_reads,
            uniquely_aligned_reads: args.min_uniquely_aligned_reads,
            percent_aligned: args.min_percent_aligned,
            percent_unique_aligned: args.min_percent_unique_aligned,
        };

        debug!("  [*] Thresholds: {:?}", thresholds);
        thresholds
    }
}

//============//
// Annotation //
//============//

/// Command line arguments controlling how samples are annotated.
#[derive(Args, Debug)]
pub struct AnnotationArgs {
    /// Whether an unavailable value skips a threshold for just that sample
    /// (`row`) or for every sample (`column`).
    #[arg(long, value_enum, default_value_t = ThresholdScope::Row)]
    pub threshold_scope: ThresholdScope,

    /// The status given to any sample with notes.
    #[arg(long, value_name = "STRING", default_value = DEFAULT_STATUS_MARKER)]
    pub status_marker: String,
}

//========//
// Output //
//========//

/// Command line arguments controlling how a report is written.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// The format of the report.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Writes the report to a file rather than stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Drops any column in which every value is unavailable.
    #[arg(long)]
    pub prune: bool,
}

impl OutputArgs {
    /// Writes `report` to the requested destination in the requested format.
    pub fn write_report(&self, report: &Report) -> anyhow::Result<()> {
        debug!("  [*] Format: {}", self.format);
        debug!("  [*] Output: {:?}", self.output);
        debug!("  [*] Prune: {}", self.prune);

        let report = if self.prune {
            report.prune_unavailable()
        } else {
            report.clone()
        };

        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("could not create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                report.write(self.format, &mut writer)?;
                writer.flush()?;
                info!("Wrote report to {}.", path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                report.write(self.format, &mut handle)?;
                handle.flush()?;
            }
        }

        Ok(())
    }
}
