//! Functionality related to the `qcreport fastqc` command itself.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use crate::report::{fastqc_report, SummaryOptions, Thresholds};
use crate::utils::args::{AnnotationArgs, LabelArgs, OutputArgs};

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `qcreport fastqc` subcommand.
#[derive(Args, Debug)]
pub struct FastqcArgs {
    /// Directory holding the `<sample>_fastqc` results (expanded or zipped).
    #[arg(value_name = "DIR")]
    src: PathBuf,

    /// Minimum number of total sequences.
    #[arg(long, value_name = "F64")]
    min_total_reads: Option<f64>,

    #[command(flatten)]
    labels: LabelArgs,

    #[command(flatten)]
    annotation: AnnotationArgs,

    #[command(flatten)]
    output: OutputArgs,
}

//==============//
// Main command //
//==============//

/// Main method for the `qcreport fastqc` subcommand.
pub fn fastqc(args: FastqcArgs) -> anyhow::Result<()> {
    info!("Starting fastqc command...");
    debug!("Arguments:");

    //=============//
    // Source Path //
    //=============//

    let src = args.src;
    debug!("  [*] Source: {}", src.display());

    //=========//
    // Options //
    //=========//

    let thresholds = Thresholds {
        total_reads: args.min_total_reads,
        ..Default::default()
    };
    debug!("  [*] Thresholds: {:?}", thresholds);
    debug!("  [*] Threshold scope: {}", args.annotation.threshold_scope);
    debug!("  [*] Status marker: {}", args.annotation.status_marker);

    let options = SummaryOptions::new(
        args.labels.labels_of_interest(),
        thresholds,
        args.annotation.threshold_scope,
        args.annotation.status_marker,
    );

    //==============//
    // Build report //
    //==============//

    let report = fastqc_report(&src, &options)
        .with_context(|| format!("could not summarize FASTQC results in {}", src.display()))?;
    info!("Summarized {} sample(s).", report.rows().len());

    args.output.write_report(&report)
}
