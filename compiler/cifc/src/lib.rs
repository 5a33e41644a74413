//! CIF command-line tool.
//!
//! The `cif` binary is a thin argument dispatcher over [`commands`]. Each
//! command reads one or more files, parses them with `cif_dict`, and prints
//! to stdout; problems go to stderr.

pub mod commands;
pub mod options;
pub mod tracing_setup;

pub use options::CliOptions;
