//! `qcreport` is a command line tool that aggregates the quality control
//! output of a sequencing run into a single per-sample report. This package
//! is composed of both a library crate, as well as a binary crate.
//!
//! The report combines two sources:
//!
//! * FASTQC results, expanded or zipped, from which the total sequence count
//!   and any failing checks are gathered (see [`fastqc`]), and
//! * alignment statistics from a supported pipeline (see [`alignment`]).
//!
//! Sources are outer-joined on the sample name, percentages are derived, and
//! samples that fall below caller-supplied thresholds are annotated (see
//! [`report`]).
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod alignment;
pub mod errors;
pub mod fastqc;
pub mod list;
pub mod report;
pub mod summary;
pub mod utils;
