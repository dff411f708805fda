//! Functionality related to the `qcreport summary` command itself.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info, warn};

use crate::alignment::Pipeline;
use crate::report::plot::write_aligned_reads_plot;
use crate::report::{combined_report, SummaryOptions, Thresholds};
use crate::utils::args::{AnnotationArgs, LabelArgs, OutputArgs, ThresholdArgs};

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `qcreport summary` subcommand.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// The pipeline that produced the alignment output (see `list pipelines`).
    #[arg(value_name = "PIPELINE")]
    pipeline: Pipeline,

    /// The pipeline's output directory.
    #[arg(value_name = "ALIGNMENT_DIR")]
    alignment_dir: PathBuf,

    /// Directory holding the `<sample>_fastqc` results (expanded or zipped).
    #[arg(value_name = "FASTQC_DIR")]
    fastqc_dir: PathBuf,

    /// Also writes a bar plot of read counts to this HTML file.
    #[arg(long, value_name = "PATH")]
    plot: Option<PathBuf>,

    #[command(flatten)]
    labels: LabelArgs,

    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[command(flatten)]
    annotation: AnnotationArgs,

    #[command(flatten)]
    output: OutputArgs,
}

//==============//
// Main command //
//==============//

/// Main method for the `qcreport summary` subcommand.
pub fn summary(args: SummaryArgs) -> anyhow::Result<()> {
    info!("Starting summary command...");
    debug!("Arguments:");

    //========//
    // Inputs //
    //========//

    let pipeline = args.pipeline;
    debug!("  [*] Pipeline: {}", pipeline);

    let alignment_dir = args.alignment_dir;
    debug!("  [*] Alignment directory: {}", alignment_dir.display());

    let fastqc_dir = args.fastqc_dir;
    debug!("  [*] FASTQC directory: {}", fastqc_dir.display());

    //=========//
    // Options //
    //=========//

    let thresholds = Thresholds::from(&args.thresholds);
    let total_reads_threshold = thresholds.total_reads;
    debug!("  [*] Threshold scope: {}", args.annotation.threshold_scope);
    debug!("  [*] Status marker: {}", args.annotation.status_marker);
    debug!("  [*] Plot: {:?}", args.plot);

    let options = SummaryOptions::new(
        args.labels.labels_of_interest(),
        thresholds,
        args.annotation.threshold_scope,
        args.annotation.status_marker,
    );

    //==============//
    // Build report //
    //==============//

    let report = combined_report(pipeline, &alignment_dir, &fastqc_dir, &options)
        .context("could not build the combined QC report")?;

    let flagged = report.rows().iter().filter(|r| !r.status.is_empty()).count();
    info!(
        "Summarized {} sample(s); {} flagged for review.",
        report.rows().len(),
        flagged
    );
    if !report.warnings().is_empty() {
        warn!(
            "The report was built with {} warning(s).",
            report.warnings().len()
        );
    }

    //=========//
    // Outputs //
    //=========//

    if let Some(path) = &args.plot {
        write_aligned_reads_plot(&report, total_reads_threshold, path)?;
    }

    args.output.write_report(&report)
}
