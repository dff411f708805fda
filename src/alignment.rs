//! Alignment statistics produced by the supported alignment and counting
//! pipelines.
//!
//! Each [`Pipeline`] writes its statistics in a different layout and reports
//! a different subset of metrics. Selecting a pipeline selects the
//! [`AlignmentStatsParser`] that understands its output; metrics a pipeline
//! cannot supply are left [`Unavailable`](crate::report::Metric::Unavailable).

pub mod command;
pub mod kallisto;
pub mod star;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use tracing::debug;

use crate::errors::{Error, Result};
use crate::report::{SampleMetricsRow, Warning};

/// The alignment and counting pipelines whose output can be parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pipeline {
    /// STAR alignment followed by HTSeq counting.
    StarHtseq,

    /// Kallisto pseudoalignment.
    Kallisto,
}

impl Pipeline {
    /// Every supported pipeline.
    pub const ALL: &'static [Pipeline] = &[Pipeline::StarHtseq, Pipeline::Kallisto];

    /// The canonical name of the pipeline.
    pub fn name(&self) -> &'static str {
        match self {
            Pipeline::StarHtseq => "STAR_HTSeq",
            Pipeline::Kallisto => "Kallisto",
        }
    }

    /// A short description of the statistics the pipeline supplies.
    pub fn description(&self) -> &'static str {
        match self {
            Pipeline::StarHtseq => {
                "Total and uniquely aligned reads from each <sample>/Log.final.out"
            }
            Pipeline::Kallisto => "Aligned reads summed from each <sample>_counts.txt",
        }
    }

    /// The names of every supported pipeline, comma separated.
    pub fn supported_names() -> String {
        Pipeline::ALL.iter().map(|p| p.name()).join(", ")
    }

    /// Gets the parser that understands this pipeline's output.
    pub fn parser(&self) -> Box<dyn AlignmentStatsParser> {
        match self {
            Pipeline::StarHtseq => Box::new(star::StarHtseqParser),
            Pipeline::Kallisto => Box::new(kallisto::KallistoParser),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pipeline {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "star_htseq" => Ok(Pipeline::StarHtseq),
            "kallisto" => Ok(Pipeline::Kallisto),
            _ => Err(Error::UnsupportedPipeline(s.to_string())),
        }
    }
}

/// Reads the per-sample statistics written by one alignment pipeline.
pub trait AlignmentStatsParser {
    /// The pipeline this parser understands.
    fn pipeline(&self) -> Pipeline;

    /// Parses every sample found within the pipeline's output directory. Each
    /// row has at least the sample name and one count populated.
    fn parse(&self, output_dir: &Path) -> Result<Vec<SampleMetricsRow>>;
}

/// Parses the alignment statistics for every sample in `output_dir`, sorted
/// by sample name. Finding no samples at all is not an error, but is reported
/// as a [`Warning::EmptyResult`].
pub fn parse_alignment_stats(
    pipeline: Pipeline,
    output_dir: &Path,
) -> Result<(Vec<SampleMetricsRow>, Vec<Warning>)> {
    debug!(
        "Parsing {} alignment statistics from {}.",
        pipeline,
        output_dir.display()
    );

    let mut rows = pipeline.parser().parse(output_dir)?;
    rows.sort_by(|a, b| a.sample_name.cmp(&b.sample_name));

    let mut warnings = Vec::new();
    if rows.is_empty() {
        warnings.push(Warning::empty_result("alignment statistics", output_dir));
    }

    Ok((rows, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_from_str() {
        assert_eq!("STAR_HTSeq".parse::<Pipeline>().unwrap(), Pipeline::StarHtseq);
        assert_eq!("star-htseq".parse::<Pipeline>().unwrap(), Pipeline::StarHtseq);
        assert_eq!("Kallisto".parse::<Pipeline>().unwrap(), Pipeline::Kallisto);
        assert_eq!("kallisto".parse::<Pipeline>().unwrap(), Pipeline::Kallisto);
    }

    #[test]
    fn test_unsupported_pipeline() {
        let err = "kablooie".parse::<Pipeline>().unwrap_err();
        match err {
            Error::UnsupportedPipeline(name) => assert_eq!(name, "kablooie"),
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn test_parser_dispatch() {
        for pipeline in Pipeline::ALL {
            assert_eq!(pipeline.parser().pipeline(), *pipeline);
        }
    }

    #[test]
    fn test_empty_output_dir_warns() {
        let tmp = tempfile::tempdir().unwrap();
        for pipeline in Pipeline::ALL {
            let (rows, warnings) = parse_alignment_stats(*pipeline, tmp.path()).unwrap();
            assert!(rows.is_empty());
            assert_eq!(
                warnings,
                vec![Warning::EmptyResult {
                    what: "alignment statistics",
                    directory: tmp.path().to_path_buf(),
                }]
            );
        }
    }
}
