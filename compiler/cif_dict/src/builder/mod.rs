//! Dictionary builder: the loop-versus-scalar state machine.
//!
//! The builder pulls tokens one at a time from a [`TokenStream`] and
//! classifies each exactly once. The tokenizer cannot tell the last loop tag
//! from the first loop value, or the end of a loop from a new construct, so
//! the builder re-dispatches the deciding token through a one-token pushback
//! slot instead of asking the tokenizer to look ahead.
//!
//! # States
//!
//! ```text
//!              loop_                 value
//!   Idle ───────────────► Tags ─────────────► Values ──┐ value
//!    ▲ │ _tag                │ other (reprocess)  │ ◄──┘
//!    │ ▼                     ▼                    │ other (reprocess)
//!   Awaiting ──────────► Idle ◄──────────────────┘
//! ```
//!
//! Loop columns are buffered in a [`LoopFrame`] and committed in tag order
//! when the loop ends.

use cif_lexer_core::{Span, Token, TokenKind, TokenStream};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::document::{CifDocument, CifEntry};
use crate::{DictConfig, ParseOutput};

/// Builder state between two tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State<'a> {
    /// Between constructs.
    Idle,
    /// A tag outside any loop is waiting for its value.
    AwaitingScalarValue { tag: Token<'a> },
    /// After `loop_`, reading column tags.
    CollectingLoopTags,
    /// Reading loop values round-robin into the columns.
    CollectingLoopValues,
}

/// Working storage for the loop being read.
#[derive(Default)]
struct LoopFrame<'a> {
    /// Span of the `loop_` marker.
    marker: Span,
    /// Line of the `loop_` marker.
    line: u32,
    /// From the marker through the last token taken into the loop.
    extent: Span,
    tags: SmallVec<[&'a str; 8]>,
    columns: SmallVec<[Vec<&'a str>; 8]>,
    /// Values received so far, across all columns.
    count: usize,
}

impl<'a> LoopFrame<'a> {
    fn open(&mut self, marker: &Token<'a>) {
        self.marker = marker.span;
        self.line = marker.line;
        self.extent = marker.span;
        self.tags.clear();
        self.columns.clear();
        self.count = 0;
    }

    fn add_tag(&mut self, tag: &Token<'a>) {
        self.tags.push(tag.text);
        self.columns.push(Vec::new());
        self.extent = self.extent.merge(tag.span);
    }

    /// Append to column `count mod columns`. Requires at least one tag.
    fn push_value(&mut self, value: &Token<'a>) {
        let column = self.count % self.columns.len();
        self.columns[column].push(value.text);
        self.count += 1;
        self.extent = self.extent.merge(value.span);
    }

    fn span(&self) -> Span {
        self.extent
    }
}

/// Assembles a [`CifDocument`] from a token stream.
///
/// Infallible: malformed constructs become diagnostics and the document is
/// built from whatever could be attributed.
pub struct DictBuilder<'a, S: TokenStream<'a>> {
    tokens: S,
    /// Token to dispatch again before pulling a new one.
    pushback: Option<Token<'a>>,
    state: State<'a>,
    frame: LoopFrame<'a>,
    document: CifDocument,
    sink: DiagnosticSink,
}

impl<'a, S: TokenStream<'a>> DictBuilder<'a, S> {
    pub fn new(tokens: S, config: &DictConfig) -> Self {
        DictBuilder {
            tokens,
            pushback: None,
            state: State::Idle,
            frame: LoopFrame::default(),
            document: CifDocument::new(),
            sink: DiagnosticSink::new(config.diagnostic_limit, config.log_diagnostics),
        }
    }

    /// Drain the token stream and return the document with its diagnostics.
    pub fn build(mut self) -> ParseOutput {
        loop {
            let tok = self.next_token();
            trace!(kind = tok.kind.name(), line = tok.line, text = tok.text, "dispatch");

            let state = std::mem::replace(&mut self.state, State::Idle);
            self.state = match state {
                State::Idle => {
                    if tok.kind == TokenKind::Eof {
                        break;
                    }
                    self.idle(tok)
                }
                State::AwaitingScalarValue { tag } => self.awaiting_value(tag, tok),
                State::CollectingLoopTags => self.loop_tags(tok),
                State::CollectingLoopValues => self.loop_values(tok),
            };
        }
        self.finish()
    }

    // ─── Token Source ───────────────────────────────────────────────

    fn next_token(&mut self) -> Token<'a> {
        match self.pushback.take() {
            Some(tok) => tok,
            None => self.tokens.next_token(),
        }
    }

    /// Dispatch `tok` again on the next step, in the new state.
    fn reprocess(&mut self, tok: Token<'a>) {
        debug_assert!(self.pushback.is_none(), "pushback slot already full");
        self.pushback = Some(tok);
    }

    // ─── States ─────────────────────────────────────────────────────

    fn idle(&mut self, tok: Token<'a>) -> State<'a> {
        match tok.kind {
            TokenKind::BlockHeader => {
                self.document.set_block_name(tok.text);
                State::Idle
            }
            TokenKind::LoopMarker => {
                self.frame.open(&tok);
                State::CollectingLoopTags
            }
            TokenKind::TagName => State::AwaitingScalarValue { tag: tok },
            TokenKind::SemicolonField
            | TokenKind::DoubleQuoted
            | TokenKind::SingleQuoted
            | TokenKind::Bare => {
                self.document.push_garbage(tok.text);
                self.report(
                    DiagnosticKind::orphan_value(tok.text),
                    tok.span,
                    tok.line,
                );
                State::Idle
            }
            TokenKind::Eof => State::Idle,
        }
    }

    fn awaiting_value(&mut self, tag: Token<'a>, tok: Token<'a>) -> State<'a> {
        if tok.kind.is_value() {
            self.document
                .insert(tag.text, CifEntry::Scalar(tok.text.to_owned()));
        } else {
            self.report(
                DiagnosticKind::MissingValue {
                    tag: tag.text.to_owned(),
                    found: tok.kind,
                },
                tag.span,
                tag.line,
            );
            self.reprocess(tok);
        }
        State::Idle
    }

    fn loop_tags(&mut self, tok: Token<'a>) -> State<'a> {
        if tok.kind == TokenKind::TagName {
            self.frame.add_tag(&tok);
            return State::CollectingLoopTags;
        }

        self.reprocess(tok);
        if self.frame.tags.is_empty() {
            self.report(
                DiagnosticKind::LoopWithoutTags,
                self.frame.marker,
                self.frame.line,
            );
            State::Idle
        } else if tok.kind.is_value() {
            State::CollectingLoopValues
        } else {
            self.report(
                DiagnosticKind::EmptyLoop {
                    columns: self.frame.tags.len(),
                },
                self.frame.span(),
                self.frame.line,
            );
            self.commit_loop();
            State::Idle
        }
    }

    fn loop_values(&mut self, tok: Token<'a>) -> State<'a> {
        if tok.kind.is_value() {
            self.frame.push_value(&tok);
            return State::CollectingLoopValues;
        }

        let columns = self.frame.columns.len();
        let values = self.frame.count;
        if values % columns != 0 {
            self.report(
                DiagnosticKind::RaggedLoop { columns, values },
                self.frame.span(),
                self.frame.line,
            );
        }
        self.commit_loop();
        self.reprocess(tok);
        State::Idle
    }

    // ─── Output ─────────────────────────────────────────────────────

    /// Move the frame's columns into the document, in tag order.
    fn commit_loop(&mut self) {
        let columns = self.frame.tags.len();
        let rows = self.frame.count / columns.max(1);
        for (tag, values) in self.frame.tags.drain(..).zip(self.frame.columns.drain(..)) {
            let values = values.into_iter().map(str::to_owned).collect();
            self.document.insert(tag, CifEntry::Column(values));
        }
        debug!(line = self.frame.line, columns, rows, "loop committed");
    }

    fn report(&mut self, kind: DiagnosticKind, span: Span, line: u32) {
        self.sink.push(Diagnostic::new(kind, span, line));
    }

    fn finish(mut self) -> ParseOutput {
        for anomaly in self.tokens.anomalies() {
            self.sink.push(Diagnostic::from(*anomaly));
        }
        let (diagnostics, suppressed_diagnostics) = self.sink.finish();

        debug!(
            tags = self.document.len(),
            garbage = self.document.garbage().len(),
            diagnostics = diagnostics.len(),
            "document built"
        );

        ParseOutput {
            document: self.document,
            diagnostics,
            suppressed_diagnostics,
        }
    }
}
