//! Command handlers for the `cif` CLI.
//!
//! Each submodule implements one command. Shared helpers for reading and
//! parsing a file live here in the module root.

use cif_dict::{parse_with_config, read_source, ParseOutput};

use crate::CliOptions;

mod check;
mod debug;
mod dump;
mod fmt;
mod query;

pub use check::{check_files, render_diagnostics};
pub use debug::lex_file;
pub use dump::{dump_file, format_lookup, get_key, list_keys};
pub use fmt::format_file;
pub use query::{query_file, run_query};

/// Read a file from disk, exiting with a user-friendly error message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match read_source(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

/// Read and parse a file, then summarize its diagnostics on stderr unless
/// `--quiet` was given.
pub(crate) fn load(path: &str, options: &CliOptions) -> ParseOutput {
    let source = read_file(path);
    let output = parse_with_config(&source, &options.dict_config());
    if !options.quiet && !output.is_clean() {
        eprintln!(
            "warning: {} diagnostic(s) in '{path}'; run `cif check {path}` for details",
            output.diagnostic_count()
        );
    }
    output
}
