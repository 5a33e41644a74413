//! Low-level tokenizer for CIF (Crystallographic Information File) text.
//!
//! Standalone crate: no `cif_*` dependencies. The dictionary builder
//! (`cif_dict`) pulls tokens from here through the [`TokenStream`] trait.
//!
//! ```text
//! let buf = SourceBuffer::new(source);
//! let mut tokenizer = Tokenizer::new(&buf);
//! while let Some(tok) = tokenizer.next() {
//!     println!("{:?} {:?}", tok.kind, tok.text);
//! }
//! ```

mod anomaly;
mod cursor;
mod scanner;
mod source_buffer;
mod span;
mod tag;

pub use anomaly::{LexAnomaly, LexAnomalyKind};
pub use cursor::Cursor;
pub use scanner::{tokenize, TokenStream, Tokenizer};
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use span::Span;
pub use tag::{OwnedToken, Token, TokenKind};
