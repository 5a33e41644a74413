//! Sentinel-terminated source buffer for bounds-check-free scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! so the scanner detects EOF without explicit bounds checks. The total
//! size is rounded up to the next 64-byte boundary.
//!
//! # Encoding Detection
//!
//! During construction the buffer records:
//! - a leading UTF-8 BOM (editors on some platforms add one to CIF files;
//!   the tokenizer skips it)
//! - interior NUL bytes (never valid in CIF text)
//!
//! Issues are recorded as [`EncodingIssue`] values and surfaced by the
//! tokenizer as lexical anomalies.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// The UTF-8 encoding of U+FEFF.
pub(crate) const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Encoding issues detected during construction.
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding issue detected during source buffer construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    /// What kind of encoding issue was detected.
    pub kind: EncodingIssueKind,
    /// Byte position in the source where the issue was found.
    pub pos: u32,
    /// Byte length of the problematic sequence.
    pub len: u32,
}

/// Kind of encoding issue detected in source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-8 BOM (`0xEF 0xBB 0xBF`) at start.
    Utf8Bom,
    /// Null byte (U+0000) in source content.
    InteriorNull,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from CIF text.
    ///
    /// Sources of `u32::MAX` bytes or more are truncated at the last
    /// character boundary below that limit; spans are 32-bit.
    pub fn new(source: &str) -> Self {
        let source_len = truncated_len(source, u32::MAX as usize - 1);
        let source_bytes = &source.as_bytes()[..source_len];

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // The sentinel (buf[source_len]) and padding stay 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        let mut encoding_issues = Vec::new();
        detect_bom(source_bytes, &mut encoding_issues);
        detect_interior_nulls(source_bytes, &mut encoding_issues);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            encoding_issues,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Returns `true` if the source starts with a UTF-8 byte order mark.
    pub fn has_bom(&self) -> bool {
        self.encoding_issues
            .first()
            .is_some_and(|issue| issue.kind == EncodingIssueKind::Utf8Bom)
    }

    /// Encoding issues detected during construction, in source order.
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }
}

const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 64);

/// Length of the longest prefix of `source` that fits in `max` bytes and
/// ends on a character boundary.
pub(crate) fn truncated_len(source: &str, max: usize) -> usize {
    let mut len = source.len().min(max);
    while !source.is_char_boundary(len) {
        len -= 1;
    }
    len
}

/// Detect a UTF-8 byte order mark at the start of the source.
fn detect_bom(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    if source.starts_with(&UTF8_BOM) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf8Bom,
            pos: 0,
            len: 3,
        });
    }
}

/// Detect null bytes (U+0000) within the source content.
fn detect_interior_nulls(source: &[u8], issues: &mut Vec<EncodingIssue>) {
    for absolute in memchr::memchr_iter(0, source) {
        if let Ok(pos) = u32::try_from(absolute) {
            issues.push(EncodingIssue {
                kind: EncodingIssueKind::InteriorNull,
                pos,
                len: 1,
            });
        }
    }
}
