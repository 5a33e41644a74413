//! CIF dictionary builder.
//!
//! Turns CIF text into a flat [`CifDocument`]: every tag maps to a scalar
//! value or, for loop columns, an ordered list of values. Parsing never
//! fails. Malformed constructs are recovered locally and reported as
//! [`Diagnostic`]s next to the (possibly partial) document.
//!
//! ```text
//! let output = cif_dict::parse("loop_\n_a\n_b\n1 2\n3 4\n");
//! assert_eq!(output.document.column("_a"), Some(&["1".into(), "3".into()][..]));
//! ```
//!
//! The only hard failure is an unreadable input file, reported by
//! [`parse_file`] before parsing begins.

mod builder;
mod config;
mod diagnostic;
mod document;
mod read;
mod writer;

use cif_lexer_core::{SourceBuffer, Tokenizer};

pub use builder::DictBuilder;
pub use config::DictConfig;
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticKind, Severity};
pub use document::{CifDocument, CifEntry, Lookup, BLOCK_NAME_KEY, GARBAGE_KEY};
pub use read::{parse_file, parse_file_with_config, read_source, ReadError};
pub use writer::write_cif;

/// A built document together with everything that went wrong building it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOutput {
    pub document: CifDocument,
    /// Kept diagnostics, sorted by source position.
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics dropped by [`DictConfig::diagnostic_limit`].
    pub suppressed_diagnostics: usize,
}

impl ParseOutput {
    /// Returns `true` if the input produced no diagnostics at all.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.suppressed_diagnostics == 0
    }

    /// Total diagnostics, kept and suppressed.
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len() + self.suppressed_diagnostics
    }
}

/// Parse CIF text with the default configuration.
pub fn parse(source: &str) -> ParseOutput {
    parse_with_config(source, &DictConfig::default())
}

/// Parse CIF text.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn parse_with_config(source: &str, config: &DictConfig) -> ParseOutput {
    let buf = SourceBuffer::new(source);
    DictBuilder::new(Tokenizer::new(&buf), config).build()
}
