//! Supporting functionality for the `qcreport summary` subcommand.

pub mod command;
