//! Recoverable problems found while building a document.
//!
//! Nothing here is fatal. Every diagnostic describes a construct that was
//! skipped, truncated or rerouted, and the document is built regardless.
//!
//! Codes follow `W####` with the first digit naming the layer:
//! - W0xxx: lexical (reported by the tokenizer)
//! - W1xxx: structural (reported by the builder)

use std::fmt;

use cif_lexer_core::{LexAnomaly, LexAnomalyKind, Span, TokenKind};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// Stable identifier for each diagnostic kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticCode {
    // Lexical (W0xxx)
    /// Control character outside a quoted value or text field
    W0001,
    /// NUL byte in the source
    W0002,
    /// Leading byte order mark
    W0003,
    /// Quoted value not closed before end of line
    W0004,
    /// Text field not closed before end of input
    W0005,

    // Structural (W1xxx)
    /// Value with no tag (routed to garbage)
    W1001,
    /// Tag with no value
    W1002,
    /// Loop whose value count is not a multiple of its column count
    W1003,
    /// Loop with tags but no values
    W1004,
    /// Loop with no tags
    W1005,
}

impl DiagnosticCode {
    pub const ALL: &[DiagnosticCode] = &[
        DiagnosticCode::W0001,
        DiagnosticCode::W0002,
        DiagnosticCode::W0003,
        DiagnosticCode::W0004,
        DiagnosticCode::W0005,
        DiagnosticCode::W1001,
        DiagnosticCode::W1002,
        DiagnosticCode::W1003,
        DiagnosticCode::W1004,
        DiagnosticCode::W1005,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::W0001 => "W0001",
            DiagnosticCode::W0002 => "W0002",
            DiagnosticCode::W0003 => "W0003",
            DiagnosticCode::W0004 => "W0004",
            DiagnosticCode::W0005 => "W0005",
            DiagnosticCode::W1001 => "W1001",
            DiagnosticCode::W1002 => "W1002",
            DiagnosticCode::W1003 => "W1003",
            DiagnosticCode::W1004 => "W1004",
            DiagnosticCode::W1005 => "W1005",
        }
    }

    /// Raised by the tokenizer.
    pub fn is_lexical(&self) -> bool {
        self.as_str().starts_with("W0")
    }

    /// Raised by the builder.
    pub fn is_structural(&self) -> bool {
        self.as_str().starts_with("W1")
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse a code string like `"W1002"`. Case-insensitive.
impl std::str::FromStr for DiagnosticCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum DiagnosticKind {
    // === Lexical ===
    /// Control character or DEL, skipped.
    InvalidByte { byte: u8 },
    /// NUL byte, skipped.
    InteriorNull,
    /// UTF-8 byte order mark at file start, skipped.
    ByteOrderMark,
    /// Quoted value cut off at end of line or input.
    UnterminatedQuote { quote: char },
    /// Text field still open at end of input.
    UnterminatedTextField,

    // === Structural ===
    /// A value appeared with no tag to attach to. `value` is an excerpt:
    /// the first line, at most 40 characters.
    OrphanValue { value: String },
    /// A tag was followed by something other than a value.
    MissingValue { tag: String, found: TokenKind },
    /// The final loop row is short.
    RaggedLoop { columns: usize, values: usize },
    /// The loop declared tags but no values.
    EmptyLoop { columns: usize },
    /// `loop_` was not followed by any tag.
    LoopWithoutTags,
}

impl DiagnosticKind {
    /// An [`OrphanValue`](DiagnosticKind::OrphanValue) holding an excerpt
    /// of `text`; the full value is kept in the garbage list.
    pub fn orphan_value(text: &str) -> Self {
        DiagnosticKind::OrphanValue {
            value: abbreviate(text),
        }
    }
}

/// A recoverable problem with its location.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Source extent of the offending construct.
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: u32,
}

impl Diagnostic {
    #[cold]
    pub fn new(kind: DiagnosticKind, span: Span, line: u32) -> Self {
        Diagnostic { kind, span, line }
    }

    pub fn code(&self) -> DiagnosticCode {
        match self.kind {
            DiagnosticKind::InvalidByte { .. } => DiagnosticCode::W0001,
            DiagnosticKind::InteriorNull => DiagnosticCode::W0002,
            DiagnosticKind::ByteOrderMark => DiagnosticCode::W0003,
            DiagnosticKind::UnterminatedQuote { .. } => DiagnosticCode::W0004,
            DiagnosticKind::UnterminatedTextField => DiagnosticCode::W0005,
            DiagnosticKind::OrphanValue { .. } => DiagnosticCode::W1001,
            DiagnosticKind::MissingValue { .. } => DiagnosticCode::W1002,
            DiagnosticKind::RaggedLoop { .. } => DiagnosticCode::W1003,
            DiagnosticKind::EmptyLoop { .. } => DiagnosticCode::W1004,
            DiagnosticKind::LoopWithoutTags => DiagnosticCode::W1005,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::ByteOrderMark => Severity::Note,
            _ => Severity::Warning,
        }
    }

    /// One-line description of the problem.
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::InvalidByte { byte } => {
                format!("invalid byte 0x{byte:02X} skipped")
            }
            DiagnosticKind::InteriorNull => "NUL byte in source skipped".to_owned(),
            DiagnosticKind::ByteOrderMark => "byte order mark at start of file ignored".to_owned(),
            DiagnosticKind::UnterminatedQuote { quote } => {
                format!("unterminated {quote}-quoted value")
            }
            DiagnosticKind::UnterminatedTextField => {
                "unterminated text field runs to end of file".to_owned()
            }
            DiagnosticKind::OrphanValue { value } => {
                format!("value `{value}` has no tag")
            }
            DiagnosticKind::MissingValue { tag, found } => {
                format!("tag `{tag}` has no value (found {found})")
            }
            DiagnosticKind::RaggedLoop { columns, values } => format!(
                "loop has {values} values for {columns} columns; last row is missing {}",
                columns - values % columns
            ),
            DiagnosticKind::EmptyLoop { columns } => {
                format!("loop declares {columns} tags but no values")
            }
            DiagnosticKind::LoopWithoutTags => "loop declares no tags".to_owned(),
        }
    }

    /// Suggested fix, if there is a useful one.
    pub fn help(&self) -> Option<&'static str> {
        match self.kind {
            DiagnosticKind::InvalidByte { .. } => Some("remove the control character"),
            DiagnosticKind::InteriorNull => Some("remove the NUL byte"),
            DiagnosticKind::ByteOrderMark => None,
            DiagnosticKind::UnterminatedQuote { .. } => Some(
                "close the value with the same quote, followed by a space or the end of the line",
            ),
            DiagnosticKind::UnterminatedTextField => {
                Some("close the text field with `;` at the start of a line")
            }
            DiagnosticKind::OrphanValue { .. } => Some("add a tag before the value"),
            DiagnosticKind::MissingValue { .. } => {
                Some("use `?` for an unknown value or `.` for an inapplicable one")
            }
            DiagnosticKind::RaggedLoop { .. } => {
                Some("look for a missing or extra value in the loop rows")
            }
            DiagnosticKind::EmptyLoop { .. } => Some("add rows of values or remove the loop"),
            DiagnosticKind::LoopWithoutTags => Some("list the column tags after `loop_`"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] line {}: {}",
            self.severity(),
            self.code(),
            self.line,
            self.message()
        )
    }
}

impl From<LexAnomaly> for Diagnostic {
    fn from(anomaly: LexAnomaly) -> Self {
        let kind = match anomaly.kind {
            LexAnomalyKind::InvalidByte { byte } => DiagnosticKind::InvalidByte { byte },
            LexAnomalyKind::InteriorNull => DiagnosticKind::InteriorNull,
            LexAnomalyKind::ByteOrderMark => DiagnosticKind::ByteOrderMark,
            LexAnomalyKind::UnterminatedQuote { quote } => DiagnosticKind::UnterminatedQuote {
                quote: char::from(quote),
            },
            LexAnomalyKind::UnterminatedTextField => DiagnosticKind::UnterminatedTextField,
        };
        Diagnostic::new(kind, anomaly.span, anomaly.line)
    }
}

/// Longest value quoted verbatim in a message.
const MAX_QUOTED_VALUE: usize = 40;

/// Shorten long values (text fields, mostly) for one-line messages.
fn abbreviate(value: &str) -> String {
    let first_line = value.lines().next().unwrap_or("");
    match first_line.char_indices().nth(MAX_QUOTED_VALUE) {
        Some((idx, _)) => format!("{}...", &first_line[..idx]),
        None if first_line.len() < value.len() => format!("{first_line}..."),
        None => first_line.to_owned(),
    }
}

// ─── Collection ─────────────────────────────────────────────────────

/// Collects diagnostics during a build and applies the limit on finish.
pub(crate) struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    limit: usize,
    log: bool,
}

impl DiagnosticSink {
    pub(crate) fn new(limit: usize, log: bool) -> Self {
        DiagnosticSink {
            diagnostics: Vec::new(),
            limit,
            log,
        }
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Sort by source position, keep up to the limit and log what is kept.
    ///
    /// Returns the kept diagnostics and the number suppressed.
    pub(crate) fn finish(mut self) -> (Vec<Diagnostic>, usize) {
        self.diagnostics.sort_by_key(|d| (d.span.start, d.span.end));

        let mut suppressed = 0;
        if self.limit > 0 && self.diagnostics.len() > self.limit {
            suppressed = self.diagnostics.len() - self.limit;
            self.diagnostics.truncate(self.limit);
        }

        if self.log {
            for diag in &self.diagnostics {
                tracing::warn!(
                    code = diag.code().as_str(),
                    line = diag.line,
                    "{}",
                    diag.message()
                );
            }
        }
        if suppressed > 0 {
            tracing::debug!(suppressed, "diagnostic limit reached");
        }

        (self.diagnostics, suppressed)
    }
}

#[cfg(test)]
mod tests;
