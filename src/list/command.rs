//! Functionality related to the `qcreport list` command itself.

use anyhow::bail;
use clap::{builder::PossibleValuesParser, Args};

use prettytable::{row, Table};

use crate::alignment::Pipeline;
use crate::fastqc::FASTQC_SUMMARY_LABELS;

//========================//
// Command-line arguments //
//========================//

/// Command line arguments for `qcreport list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// The subject which you want to list values for.
    #[arg(value_parser = PossibleValuesParser::new(["labels", "pipelines"]))]
    subject: String,
}

//==============//
// Main command //
//==============//

/// Main method for the `qcreport list` subcommand.
pub fn list(args: ListArgs) -> anyhow::Result<()> {
    match args.subject.as_str() {
        "labels" => {
            let mut table = Table::new();

            table.add_row(row!["FASTQC Check"]);
            for label in FASTQC_SUMMARY_LABELS {
                table.add_row(row![label]);
            }

            table.printstd();

            Ok(())
        }
        "pipelines" => {
            let mut table = Table::new();

            table.add_row(row!["Name", "Description"]);
            for pipeline in Pipeline::ALL {
                table.add_row(row![pipeline.name(), pipeline.description()]);
            }

            table.printstd();

            Ok(())
        }
        s => bail!("Unsupported subject: {}", s),
    }
}
