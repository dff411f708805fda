use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand};
use git_testament::{git_testament, render_testament};

use qcreport::alignment::command::{self as alignment, AlignmentArgs};
use qcreport::fastqc::command::{self as fastqc, FastqcArgs};
use qcreport::list::command::{self as list, ListArgs};
use qcreport::summary::command::{self as summary, SummaryArgs};

git_testament!(TESTAMENT);

//===============//
// Command setup //
//===============//

#[derive(Parser)]
#[command(name = "qcreport", propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    subcommand: Subcommands,

    #[command(flatten)]
    verbosity: Verbosity,
}

/// Verbosity arguments shared by every subcommand.
#[derive(Args)]
struct Verbosity {
    /// Only errors are printed to the stderr stream.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// All available information, including debug information, is printed to
    /// stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl Verbosity {
    fn level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[derive(Subcommand)]
enum Subcommands {
    /// Summarizes alignment statistics from a supported pipeline.
    Alignment(AlignmentArgs),

    /// Summarizes FASTQC results.
    Fastqc(FastqcArgs),

    /// Lists the FASTQC checks and pipelines that are supported.
    List(ListArgs),

    /// Combines FASTQC results and alignment statistics into one report.
    Summary(SummaryArgs),
}

fn main() -> anyhow::Result<()> {
    let version = render_testament!(TESTAMENT);
    let matches = Cli::command().version(version).get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(cli.verbosity.level())
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match cli.subcommand {
        Subcommands::Alignment(args) => alignment::alignment(args),
        Subcommands::Fastqc(args) => fastqc::fastqc(args),
        Subcommands::List(args) => list::list(args),
        Subcommands::Summary(args) => summary::summary(args),
    }
}
