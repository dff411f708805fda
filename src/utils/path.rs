//! Utilities related to path manipulation.

use std::path::{Path, PathBuf};

use glob::MatchOptions;

use crate::errors::{Error, Result};

/// A trait that adds a [`file_name_str`](FileNameStr::file_name_str) method
/// to [`Path`]. Report files are matched by name, so it's handy to get at the
/// final component as a `&str` directly.
pub trait FileNameStr {
    /// Gets the final component of the path as a `&str`, if it exists and is
    /// valid UTF-8.
    ///
    /// ```
    /// use std::path::Path;
    /// use qcreport::utils::path::FileNameStr;
    ///
    /// let summary = Path::new("results/ARH1_S1_fastqc/summary.txt");
    /// assert_eq!(summary.file_name_str(), Some("summary.txt"));
    /// ```
    fn file_name_str(&self) -> Option<&str>;
}

impl FileNameStr for Path {
    fn file_name_str(&self) -> Option<&str> {
        self.file_name().and_then(|name| name.to_str())
    }
}

/// Finds every path under `directory` matching the glob `pattern`. The
/// directory itself is escaped, so only `pattern` is interpreted. Results are
/// sorted so that traversal order never leaks into reports.
///
/// Wildcards never match a leading `.`, so hidden files and directories (for
/// example, `._sample_counts.txt` sidecars or `.snapshot/`) are skipped.
pub fn glob_within(directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    glob_within_with(
        directory,
        pattern,
        MatchOptions {
            require_literal_leading_dot: true,
            ..Default::default()
        },
    )
}

/// Like [`glob_within`], but wildcards also match hidden files and
/// directories.
pub fn glob_within_including_hidden(directory: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    glob_within_with(directory, pattern, MatchOptions::default())
}

fn glob_within_with(
    directory: &Path,
    pattern: &str,
    options: MatchOptions,
) -> Result<Vec<PathBuf>> {
    let root = directory
        .to_str()
        .ok_or_else(|| Error::NonUtf8Path(directory.to_path_buf()))?;

    let full_pattern = format!(
        "{}/{}",
        glob::Pattern::escape(root.trim_end_matches('/')),
        pattern
    );

    let mut paths =
        glob::glob_with(&full_pattern, options)?.collect::<std::result::Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}
