//! Byte cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte by byte. EOF is detected
//! when the current byte equals the sentinel (`0x00`) and the position
//! has reached the source length; a NUL before that point is an interior
//! null, not EOF.
//!
//! The `skip_*`/`find_*` helpers use `memchr` to jump over long runs of
//! value text, which dominate real mmCIF files (multi-megabyte atom
//! loops and long text fields).

/// Byte cursor over a sentinel-terminated buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], so a scanner can snapshot it cheaply.
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and every byte after it is `0x00`. This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position (`0x00` at EOF).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte at an absolute offset (`0x00` past the source).
    #[inline]
    pub fn byte_at(&self, pos: u32) -> u8 {
        self.buf[pos as usize]
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` if the cursor has reached EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Extract a source substring as `&str`.
    ///
    /// # Contract
    ///
    /// `start..end` must lie within the source content and on character
    /// boundaries. The tokenizer only splits at ASCII bytes, and the
    /// source was a `&str`, so both hold for every token boundary.
    #[allow(
        unsafe_code,
        reason = "from_utf8_unchecked on source originally validated as &str"
    )]
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        let bytes = &self.buf[start as usize..end as usize];
        debug_assert!(std::str::from_utf8(bytes).is_ok());
        // SAFETY: The buffer was copied from a `&str` and the tokenizer only
        // cuts at ASCII bytes, which are always character boundaries.
        unsafe { std::str::from_utf8_unchecked(bytes) }
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false` so the sentinel stops the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Advance past blanks: space, tab, and carriage return.
    ///
    /// A CR is blank on its own; in a CRLF pair the LF that follows is
    /// left for the caller to count as the line break.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        loop {
            let b = self.buf[self.pos as usize];
            if b == b' ' || b == b'\t' || b == b'\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Remaining source content from the current position.
    #[inline]
    fn remaining(&self) -> &'a [u8] {
        let start = (self.pos as usize).min(self.source_len as usize);
        &self.buf[start..self.source_len as usize]
    }

    /// Advance to the next `\n` byte or EOF.
    ///
    /// Used to skip comment bodies. The newline itself is not consumed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr(b'\n', self.remaining()) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Advance to the next `quote` or `\n`, returning the byte found.
    ///
    /// Returns `0` and positions the cursor at EOF if neither occurs.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    pub fn skip_to_quote_or_newline(&mut self, quote: u8) -> u8 {
        match memchr::memchr2(quote, b'\n', self.remaining()) {
            Some(offset) => {
                self.pos += offset as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Find the next `;` that sits in column 0, at or after the current
    /// position. Returns its absolute offset without moving the cursor.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    pub fn find_line_start_semicolon(&self) -> Option<u32> {
        memchr::memmem::find(self.remaining(), b"\n;").map(|offset| self.pos + offset as u32 + 1)
    }

    /// Count `\n` bytes in `start..end`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "count is bounded by source_len which fits in u32"
    )]
    pub fn count_newlines(&self, start: u32, end: u32) -> u32 {
        memchr::memchr_iter(b'\n', &self.buf[start as usize..end as usize]).count() as u32
    }

    /// Move the cursor to an absolute offset within the source.
    #[inline]
    pub fn seek(&mut self, pos: u32) {
        debug_assert!(pos <= self.source_len, "seek past EOF");
        self.pos = pos;
    }
}
