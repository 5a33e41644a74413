//! Lexical anomalies recorded while scanning.
//!
//! The tokenizer never fails. Anything it cannot make sense of is skipped
//! or truncated, and an anomaly is recorded here so the integration layer
//! (`cif_dict`) can turn it into a diagnostic.

use crate::source_buffer::{EncodingIssue, EncodingIssueKind};
use crate::Span;

/// A recoverable lexical problem with its location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LexAnomaly {
    /// What went wrong.
    pub kind: LexAnomalyKind,
    /// Where in the source.
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: u32,
}

/// Kind of lexical anomaly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LexAnomalyKind {
    /// Control character (or DEL) outside any quoted value or text field.
    /// Skipped one byte at a time.
    InvalidByte { byte: u8 },
    /// NUL byte inside the source content.
    InteriorNull,
    /// UTF-8 byte order mark at the start of the file. Skipped.
    ByteOrderMark,
    /// Quoted value cut off by a line end or EOF before its closing quote.
    UnterminatedQuote { quote: u8 },
    /// Semicolon text field still open at EOF.
    UnterminatedTextField,
}

impl LexAnomaly {
    /// Convert an encoding issue found during buffer construction.
    ///
    /// `line` must be the line containing `issue.pos`.
    pub(crate) fn from_encoding_issue(issue: EncodingIssue, line: u32) -> Self {
        let kind = match issue.kind {
            EncodingIssueKind::Utf8Bom => LexAnomalyKind::ByteOrderMark,
            EncodingIssueKind::InteriorNull => LexAnomalyKind::InteriorNull,
        };
        LexAnomaly {
            kind,
            span: Span::new(issue.pos, issue.pos + issue.len),
            line,
        }
    }
}
