//! Hand-written CIF tokenizer producing classified [`Token`]s.
//!
//! The tokenizer runs over a sentinel-terminated [`Cursor`] and yields one
//! token per call, borrowing token text from the [`SourceBuffer`]. It never
//! allocates per token and never fails: malformed input is skipped or
//! truncated and recorded as a [`LexAnomaly`].
//!
//! # Lexical modes
//!
//! - **Default**: blanks, newlines and `#` comments are consumed silently;
//!   block headers, loop markers, tags, quoted and bare values are
//!   recognized at token start.
//! - **Quoted**: entered at a `'` or `"` at token start. A matching quote
//!   closes the value only when followed by a blank, a line break or EOF,
//!   so `'it's fine'` is one value. Quoted values never span lines.
//! - **Text field**: entered at a `;` in column 0. Everything up to the next
//!   column-0 `;` is taken verbatim, newlines, quotes and `#` included.
//!
//! Block headers and loop markers are only recognized as the first token on
//! their line; elsewhere `data_x` and `loop_` are ordinary bare values.

use crate::anomaly::{LexAnomaly, LexAnomalyKind};
use crate::cursor::Cursor;
use crate::source_buffer::SourceBuffer;
use crate::tag::{OwnedToken, Token, TokenKind};
use crate::Span;

/// Length of the `data_` block header sigil.
const DATA_SIGIL_LEN: usize = 5;

/// A pull-based source of CIF tokens.
///
/// This is the seam between the tokenizer and the dictionary builder: the
/// builder only ever asks for the next token, and reads the accumulated
/// anomalies once the stream is exhausted.
pub trait TokenStream<'a> {
    /// Produce the next token. Returns [`TokenKind::Eof`] once exhausted,
    /// and keeps returning it on every later call.
    fn next_token(&mut self) -> Token<'a>;

    /// Lexical anomalies recorded so far, in source order.
    fn anomalies(&self) -> &[LexAnomaly] {
        &[]
    }
}

/// CIF tokenizer over a [`SourceBuffer`].
///
/// Finite and not restartable: scanning the same text again needs a fresh
/// `Tokenizer`. All state (position, line counter, anomalies) is owned by
/// the instance.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    /// 1-based line of the cursor.
    line: u32,
    /// Offset of the first byte of the current line.
    line_start: u32,
    /// No token has started on the current line yet.
    first_on_line: bool,
    anomalies: Vec<LexAnomaly>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at the start of `buf`.
    ///
    /// Encoding issues found by the buffer are carried over as anomalies,
    /// and a leading byte order mark is skipped.
    pub fn new(buf: &'a SourceBuffer) -> Self {
        let mut cursor = buf.cursor();

        let mut anomalies = Vec::with_capacity(buf.encoding_issues().len());
        let mut line = 1;
        let mut counted = 0;
        for issue in buf.encoding_issues() {
            line += cursor.count_newlines(counted, issue.pos);
            counted = issue.pos;
            anomalies.push(LexAnomaly::from_encoding_issue(*issue, line));
        }

        if buf.has_bom() {
            cursor.advance_n(3);
        }

        Self {
            line: 1,
            line_start: cursor.pos(),
            cursor,
            first_on_line: true,
            anomalies,
        }
    }

    /// Produce the next token.
    ///
    /// Returns a [`TokenKind::Eof`] token with an empty span when the source
    /// is exhausted. Subsequent calls continue to return `Eof`.
    pub fn next_token(&mut self) -> Token<'a> {
        self.scan()
    }

    /// Lexical anomalies recorded so far, in source order.
    pub fn anomalies(&self) -> &[LexAnomaly] {
        &self.anomalies
    }

    fn scan(&mut self) -> Token<'a> {
        loop {
            let start = self.cursor.pos();
            match self.cursor.current() {
                0 => {
                    if self.cursor.is_eof() {
                        return Token::eof(start, self.line);
                    }
                    // Interior null: already reported from the buffer's
                    // encoding issues.
                    self.cursor.advance();
                }
                b' ' | b'\t' | b'\r' => self.cursor.eat_whitespace(),
                b'\n' => self.newline(),
                b'#' => self.cursor.eat_until_newline_or_eof(),
                b';' if start == self.line_start => return self.text_field(start),
                quote @ (b'"' | b'\'') => return self.quoted(start, quote),
                b'_' => return self.tag(start),
                1..=8 | 11..=12 | 14..=31 | 127 => self.invalid_byte(start),
                _ => return self.bare_or_reserved(start),
            }
        }
    }

    // ─── Trivia ─────────────────────────────────────────────────────

    fn newline(&mut self) {
        self.cursor.advance();
        self.line += 1;
        self.line_start = self.cursor.pos();
        self.first_on_line = true;
    }

    fn invalid_byte(&mut self, start: u32) {
        let byte = self.cursor.current();
        self.cursor.advance();
        self.anomalies.push(LexAnomaly {
            kind: LexAnomalyKind::InvalidByte { byte },
            span: Span::new(start, self.cursor.pos()),
            line: self.line,
        });
    }

    // ─── Tags, Bare Values, Reserved Words ──────────────────────────

    fn tag(&mut self, start: u32) -> Token<'a> {
        self.first_on_line = false;
        self.cursor.advance(); // consume '_'
        self.cursor.eat_while(is_value_byte);
        self.token(TokenKind::TagName, self.cursor.slice_from(start), start)
    }

    fn bare_or_reserved(&mut self, start: u32) -> Token<'a> {
        let leads_line = std::mem::replace(&mut self.first_on_line, false);
        self.cursor.eat_while(is_value_byte);
        let text = self.cursor.slice_from(start);

        if leads_line {
            if let Some(name) = block_name(text) {
                return self.token(TokenKind::BlockHeader, name, start);
            }
            if text.eq_ignore_ascii_case("loop_") {
                return self.token(TokenKind::LoopMarker, text, start);
            }
        }
        self.token(TokenKind::Bare, text, start)
    }

    // ─── Quoted Values ──────────────────────────────────────────────

    fn quoted(&mut self, start: u32, quote: u8) -> Token<'a> {
        self.first_on_line = false;
        let kind = if quote == b'"' {
            TokenKind::DoubleQuoted
        } else {
            TokenKind::SingleQuoted
        };

        self.cursor.advance(); // consume opening quote
        let content_start = self.cursor.pos();
        loop {
            let found = self.cursor.skip_to_quote_or_newline(quote);
            if found != quote {
                // Line end or EOF before a closing quote.
                let mut content_end = self.cursor.pos();
                if content_end > content_start && self.cursor.byte_at(content_end - 1) == b'\r' {
                    content_end -= 1;
                }
                self.anomalies.push(LexAnomaly {
                    kind: LexAnomalyKind::UnterminatedQuote { quote },
                    span: Span::new(start, content_end),
                    line: self.line,
                });
                let text = self.cursor.slice(content_start, content_end);
                return self.token(kind, text, start);
            }

            let close = self.cursor.pos();
            self.cursor.advance(); // consume candidate closing quote
            if self.at_token_end() {
                let text = self.cursor.slice(content_start, close);
                return self.token(kind, text, start);
            }
            // Quote followed by value text: part of the value.
        }
    }

    /// Returns `true` if the cursor sits on a blank, a line break or EOF.
    #[inline]
    fn at_token_end(&self) -> bool {
        match self.cursor.current() {
            b' ' | b'\t' | b'\r' | b'\n' => true,
            0 => self.cursor.is_eof(),
            _ => false,
        }
    }

    // ─── Semicolon Text Fields ──────────────────────────────────────

    fn text_field(&mut self, start: u32) -> Token<'a> {
        self.first_on_line = false;
        let line = self.line;

        self.cursor.advance(); // consume opening ';'
        let content_start = self.cursor.pos();
        let close = self.cursor.find_line_start_semicolon();
        let content_end = close.unwrap_or_else(|| self.cursor.source_len());

        self.line += self.cursor.count_newlines(content_start, content_end);
        self.cursor.seek(content_end);
        let text = self.cursor.slice(content_start, content_end);

        if close.is_some() {
            self.line_start = content_end;
            self.cursor.advance(); // consume closing ';'
        } else {
            self.anomalies.push(LexAnomaly {
                kind: LexAnomalyKind::UnterminatedTextField,
                span: Span::new(start, content_end),
                line,
            });
        }

        Token {
            kind: TokenKind::SemicolonField,
            text,
            span: Span::new(start, self.cursor.pos()),
            line,
        }
    }

    /// Build a token spanning `start` to the current position.
    #[inline]
    fn token(&self, kind: TokenKind, text: &'a str, start: u32) -> Token<'a> {
        Token {
            kind,
            text,
            span: Span::new(start, self.cursor.pos()),
            line: self.line,
        }
    }
}

impl<'a> TokenStream<'a> for Tokenizer<'a> {
    fn next_token(&mut self) -> Token<'a> {
        self.scan()
    }

    fn anomalies(&self) -> &[LexAnomaly] {
        &self.anomalies
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let tok = self.scan();
        if tok.kind == TokenKind::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

/// Returns the block name if `text` is `data_<name>` (sigil case-insensitive).
fn block_name(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.len() > DATA_SIGIL_LEN && bytes[..DATA_SIGIL_LEN].eq_ignore_ascii_case(b"data_") {
        Some(&text[DATA_SIGIL_LEN..])
    } else {
        None
    }
}

/// 256-byte lookup table for bytes that may appear inside a bare value or
/// tag name: everything except NUL, ASCII control characters, space and
/// DEL. Non-ASCII bytes are accepted so UTF-8 text passes through intact.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_VALUE_BYTE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        let b = i as u8;
        table[i as usize] = b > b' ' && b != 127;
        i += 1;
    }
    table
};

/// Returns `true` if `b` continues a bare value or tag name.
#[inline]
fn is_value_byte(b: u8) -> bool {
    IS_VALUE_BYTE_TABLE[b as usize]
}

/// Convenience function: tokenize a source string into owned tokens.
///
/// Returns every token except the final `Eof`, plus the anomalies. For
/// streaming access, construct a [`SourceBuffer`] and [`Tokenizer`] directly.
pub fn tokenize(source: &str) -> (Vec<OwnedToken>, Vec<LexAnomaly>) {
    let buf = SourceBuffer::new(source);
    let mut tokenizer = Tokenizer::new(&buf);
    let tokens: Vec<OwnedToken> = tokenizer.by_ref().map(|tok| tok.to_owned_token()).collect();
    (tokens, tokenizer.anomalies)
}
