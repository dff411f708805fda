//! Functionality related to the `qcreport alignment` command itself.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use super::Pipeline;
use crate::report::plot::write_aligned_reads_plot;
use crate::report::{alignment_report, SummaryOptions, Thresholds};
use crate::utils::args::{AnnotationArgs, OutputArgs, ThresholdArgs};

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `qcreport alignment` subcommand.
#[derive(Args, Debug)]
pub struct AlignmentArgs {
    /// The pipeline that produced the output (see `list pipelines`).
    #[arg(value_name = "PIPELINE")]
    pipeline: Pipeline,

    /// The pipeline's output directory.
    #[arg(value_name = "DIR")]
    src: PathBuf,

    /// Also writes a bar plot of read counts to this HTML file.
    #[arg(long, value_name = "PATH")]
    plot: Option<PathBuf>,

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

/// Main method for the `qcreport alignment` subcommand.
pub fn alignment(args: AlignmentArgs) -> anyhow::Result<()> {
    info!("Starting alignment command...");
    debug!("Arguments:");
    debug!("  [*] Pipeline: {}", args.pipeline);
    debug!("  [*] Source: {}", args.src.display());
    debug!("  [*] Plot: {:?}", args.plot);
    debug!("  [*] Threshold scope: {}", args.annotation.threshold_scope);
    debug!("  [*] Status marker: {}", args.annotation.status_marker);

    let thresholds = Thresholds::from(&args.thresholds);
    let total_reads_threshold = thresholds.total_reads;
    let options = SummaryOptions::new(
        Vec::new(),
        thresholds,
        args.annotation.threshold_scope,
        args.annotation.status_marker,
    );

    let report = alignment_report(args.pipeline, &args.src, &options).with_context(|| {
        format!(
            "could not summarize {} output in {}",
            args.pipeline,
            args.src.display()
        )
    })?;
    info!("Summarized {} sample(s).", report.rows().len());

    if let Some(path) = &args.plot {
        write_aligned_reads_plot(&report, total_reads_threshold, path)?;
    }

    args.output.write_report(&report)
}
