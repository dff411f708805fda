//! Errors that can arise while aggregating quality control reports.

use std::io;
use std::path::PathBuf;

use crate::alignment::Pipeline;

/// Convenience alias for results produced within `qcreport`.
pub type Result<T> = std::result::Result<T, Error>;

/// All of the ways in which reading and aggregating quality control reports
/// can fail.
///
/// Absence of data (an empty results directory, samples that do not line up
/// between two sources) is _not_ an error. Those conditions are surfaced as
/// [`Warning`](crate::report::Warning)s on the resulting report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested alignment and counting pipeline is not supported.
    #[error(
        "unrecognized alignment and counting pipeline specified: '{0}' (supported: {})",
        Pipeline::supported_names()
    )]
    UnsupportedPipeline(String),

    /// A report file exists but does not match the layout that is expected
    /// for it.
    #[error("malformed report {location}: {reason}")]
    SourceFormat {
        /// Where the offending report lives (a path, or an archive member).
        location: String,

        /// What was wrong with the report.
        reason: String,
    },

    /// A report file could not be opened or read.
    #[error("could not read {path:?}")]
    Io {
        /// The file being read.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// A FASTQC zip archive could not be opened or did not contain the
    /// expected member.
    #[error("could not read FASTQC archive {path:?}")]
    Archive {
        /// The archive being read.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: zip::result::ZipError,
    },

    /// A tab-delimited counts table could not be parsed.
    #[error("could not parse counts table {path:?}")]
    Table {
        /// The table being read.
        path: PathBuf,

        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// A search pattern for report files could not be constructed.
    #[error("invalid search pattern")]
    Pattern(#[from] glob::PatternError),

    /// A directory could not be traversed while searching for reports.
    #[error("could not traverse results directory")]
    Traversal(#[from] glob::GlobError),

    /// Directory paths must be valid UTF-8 to be searched.
    #[error("path is not valid UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),
}

impl Error {
    /// Creates a new [`Error::SourceFormat`].
    pub fn source_format<L, R>(location: L, reason: R) -> Self
    where
        L: Into<String>,
        R: Into<String>,
    {
        Error::SourceFormat {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Creates a closure that wraps an [`io::Error`] with the path that was
    /// being read. Handy with [`Result::map_err`].
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
