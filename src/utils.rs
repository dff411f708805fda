//! Utilities that are used across the `qcreport` subcommands.

pub mod args;
pub mod display;
pub mod path;
