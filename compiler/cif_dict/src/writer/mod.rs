//! Re-serialize a [`CifDocument`] as CIF text.
//!
//! Output layout: the `data_` header (when the document has a block name),
//! then every tag in document order. Scalars are written as `_tag value`
//! pairs, columns as single-column `loop_` blocks. Garbage is not written.
//!
//! Each value gets the lightest quoting that reads back unchanged: bare,
//! then `'...'`, then `"..."`, then a semicolon text field. Text fields
//! always end in a line break, so a multi-line value without a trailing
//! newline gains one, and a value containing a line that starts with `;`
//! cannot be written faithfully.

use crate::document::{CifDocument, CifEntry, BLOCK_NAME_KEY};

/// How a value is delimited on output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Style {
    Bare,
    SingleQuoted,
    DoubleQuoted,
    TextField,
}

/// Render `doc` as CIF text.
pub fn write_cif(doc: &CifDocument) -> String {
    let mut out = String::new();
    if let Some(name) = doc.block_name() {
        out.push_str(BLOCK_NAME_KEY);
        out.push_str(name);
        out.push('\n');
    }

    for (tag, entry) in doc.iter() {
        match entry {
            CifEntry::Scalar(value) => {
                out.push_str(tag);
                push_value(&mut out, value, true);
            }
            CifEntry::Column(values) => {
                out.push_str("loop_\n");
                out.push_str(tag);
                out.push('\n');
                for value in values {
                    push_value(&mut out, value, false);
                }
            }
        }
    }
    out
}

/// Append one value and its line break. `after_tag` means the value shares
/// a line with its tag.
fn push_value(out: &mut String, value: &str, after_tag: bool) {
    let style = choose_style(value);
    if style == Style::TextField {
        if after_tag {
            out.push('\n');
        }
        out.push(';');
        out.push_str(value);
        if !value.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(";\n");
        return;
    }

    if after_tag {
        out.push(' ');
    }
    match style {
        Style::Bare => out.push_str(value),
        Style::SingleQuoted => {
            out.push('\'');
            out.push_str(value);
            out.push('\'');
        }
        Style::DoubleQuoted => {
            out.push('"');
            out.push_str(value);
            out.push('"');
        }
        Style::TextField => {}
    }
    out.push('\n');
}

fn choose_style(value: &str) -> Style {
    if value.contains('\n') {
        Style::TextField
    } else if is_bare_safe(value) {
        Style::Bare
    } else if quote_fits(value, b'\'') {
        Style::SingleQuoted
    } else if quote_fits(value, b'"') {
        Style::DoubleQuoted
    } else {
        Style::TextField
    }
}

/// A bare value must be one token that cannot be mistaken for anything
/// else, even as the first token on a line.
fn is_bare_safe(value: &str) -> bool {
    let bytes = value.as_bytes();
    let Some(&first) = bytes.first() else {
        return false;
    };
    if matches!(first, b'_' | b'\'' | b'"' | b'#' | b';') {
        return false;
    }
    if bytes.iter().any(|&b| b <= b' ' || b == 127) {
        return false;
    }
    let reserved = value.eq_ignore_ascii_case("loop_")
        || (bytes.len() >= 5 && bytes[..5].eq_ignore_ascii_case(b"data_"));
    !reserved
}

/// `quote` can delimit `value` unless some interior `quote` is followed by
/// a blank or carriage return, which would close the value early.
fn quote_fits(value: &str, quote: u8) -> bool {
    !value
        .as_bytes()
        .windows(2)
        .any(|pair| pair[0] == quote && matches!(pair[1], b' ' | b'\t' | b'\r'))
}
