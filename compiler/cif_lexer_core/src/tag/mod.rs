//! Token kinds and the token type produced by the tokenizer.

use std::fmt;

use crate::Span;

/// Kind of a CIF token.
///
/// `#[repr(u8)]` with semantic ranges:
/// - Structural: 0-15
/// - Values: 16-31
/// - Control: 255
///
/// Comments, whitespace and newlines are consumed by the tokenizer and
/// never reach this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // === Structural ===
    /// `data_<name>` at the start of a line. Text is the name.
    BlockHeader = 0,
    /// `loop_` at the start of a line.
    LoopMarker = 1,
    /// `_name`. Text includes the leading underscore.
    TagName = 2,

    // === Values ===
    /// `;`-delimited multi-line text field. Text is the verbatim interior.
    SemicolonField = 16,
    /// `"..."` value. Text excludes the quotes.
    DoubleQuoted = 17,
    /// `'...'` value. Text excludes the quotes.
    SingleQuoted = 18,
    /// Unquoted value.
    Bare = 19,

    // === Control ===
    /// End of input. Repeats forever once reached.
    Eof = 255,
}

impl TokenKind {
    /// Returns `true` for the four kinds that carry a data value.
    #[inline]
    pub fn is_value(self) -> bool {
        matches!(
            self,
            TokenKind::SemicolonField
                | TokenKind::DoubleQuoted
                | TokenKind::SingleQuoted
                | TokenKind::Bare
        )
    }

    /// Returns `true` for block headers, loop markers and tags.
    #[inline]
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            TokenKind::BlockHeader | TokenKind::LoopMarker | TokenKind::TagName
        )
    }

    /// Human-readable name used in token dumps and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::BlockHeader => "block header",
            TokenKind::LoopMarker => "loop marker",
            TokenKind::TagName => "tag",
            TokenKind::SemicolonField => "text field",
            TokenKind::DoubleQuoted => "double-quoted value",
            TokenKind::SingleQuoted => "single-quoted value",
            TokenKind::Bare => "bare value",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified token borrowing its text from the source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Token payload with quotes, sigils and field markers already stripped
    /// (see [`TokenKind`] for what each kind carries).
    pub text: &'a str,
    /// Full extent of the token in the source, delimiters included.
    pub span: Span,
    /// 1-based line on which the token starts.
    pub line: u32,
}

impl<'a> Token<'a> {
    /// The end-of-input token at `offset`.
    pub fn eof(offset: u32, line: u32) -> Self {
        Token {
            kind: TokenKind::Eof,
            text: "",
            span: Span::point(offset),
            line,
        }
    }

    /// Copy the token out of the source buffer.
    pub fn to_owned_token(&self) -> OwnedToken {
        OwnedToken {
            kind: self.kind,
            text: self.text.to_owned(),
            span: self.span,
            line: self.line,
        }
    }
}

/// A token detached from its source buffer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OwnedToken {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
    pub line: u32,
}

impl OwnedToken {
    /// Borrow as a [`Token`].
    pub fn as_token(&self) -> Token<'_> {
        Token {
            kind: self.kind,
            text: &self.text,
            span: self.span,
            line: self.line,
        }
    }
}

const _: () = assert!(std::mem::size_of::<TokenKind>() == 1);
