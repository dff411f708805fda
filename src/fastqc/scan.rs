//! Traversal of a FASTQC results directory.
//!
//! FASTQC writes each sample's result either as an expanded `<name>_fastqc/`
//! directory, as a `<name>_fastqc.zip` archive with the same layout, or both.
//! Expanded directories are found at any depth below the results directory;
//! archives are only considered at its root. Hidden entries are searched too.
//! Both encodings yield identical records for identical content.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::parse::{FastqcReportParser, PartialRecord};
use super::FastqcRecord;
use crate::errors::{Error, Result};
use crate::utils::path::{glob_within_including_hidden, FileNameStr};

/// The suffix FASTQC appends to each result's name.
pub const FASTQC_SUFFIX: &str = "_fastqc";

/// The suffix of a zipped FASTQC result.
pub const ZIP_SUFFIX: &str = ".zip";

/// Reads one report line by line, returning the record it describes (if the
/// report described anything at all).
pub fn collect_record<R, P>(reader: R, parser: &P, location: &str) -> Result<Option<FastqcRecord>>
where
    R: BufRead,
    P: FastqcReportParser + ?Sized,
{
    let mut record = PartialRecord::default();

    for line in reader.lines() {
        let line = line.map_err(Error::io(location))?;
        parser.parse_line(line.trim_end_matches('\r'), &mut record, location)?;
    }

    record.finish(location)
}

fn read_directory_report<P>(dir: &Path, parser: &P) -> Result<Option<FastqcRecord>>
where
    P: FastqcReportParser + ?Sized,
{
    let path = dir.join(parser.file_name());
    let file = File::open(&path).map_err(Error::io(&path))?;
    collect_record(BufReader::new(file), parser, &path.display().to_string())
}

fn read_archive_report<P>(archive_path: &Path, parser: &P) -> Result<Option<FastqcRecord>>
where
    P: FastqcReportParser + ?Sized,
{
    let archive_error = |source| Error::Archive {
        path: archive_path.to_path_buf(),
        source,
    };

    let stem = archive_path
        .file_name_str()
        .and_then(|name| name.strip_suffix(ZIP_SUFFIX))
        .ok_or_else(|| Error::NonUtf8Path(archive_path.to_path_buf()))?;
    let member_name = format!("{}/{}", stem, parser.file_name());

    let file = File::open(archive_path).map_err(Error::io(archive_path))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file)).map_err(archive_error)?;
    let member = archive.by_name(&member_name).map_err(archive_error)?;

    let location = format!("{}!{}", archive_path.display(), member_name);
    collect_record(BufReader::new(member), parser, &location)
}

/// Reads the report `parser` understands from every FASTQC result below
/// `results_dir`. Records are sorted by sample name, independent of the order
/// in which results were found.
///
/// A result that is missing the report, or whose report is malformed, aborts
/// the whole scan.
pub fn scan<P>(results_dir: &Path, parser: &P) -> Result<Vec<FastqcRecord>>
where
    P: FastqcReportParser + ?Sized,
{
    let mut records = Vec::new();

    // (1) Expanded results, at any depth.
    for dir in glob_within_including_hidden(results_dir, &format!("**/*{}", FASTQC_SUFFIX))? {
        if !dir.is_dir() {
            continue;
        }

        debug!("  [*] Reading {} from {}", parser.file_name(), dir.display());
        records.extend(read_directory_report(&dir, parser)?);
    }

    // (2) Zipped results, at the root only.
    let archive_pattern = format!("*{}{}", FASTQC_SUFFIX, ZIP_SUFFIX);
    for archive in glob_within_including_hidden(results_dir, &archive_pattern)? {
        if !archive.is_file() {
            continue;
        }

        debug!(
            "  [*] Reading {} from {}",
            parser.file_name(),
            archive.display()
        );
        records.extend(read_archive_report(&archive, parser)?);
    }

    records.sort_by(|a, b| a.sample_name.cmp(&b.sample_name));
    Ok(records)
}
