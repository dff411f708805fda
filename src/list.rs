//! Supporting functionality for the `qcreport list` subcommand.

pub mod command;
