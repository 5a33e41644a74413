//! Debug command: `lex` for inspecting the token stream.

use cif_lexer_core::{SourceBuffer, Tokenizer};

use super::read_file;

/// Lex a file and display the token stream and any lexical anomalies.
pub fn lex_file(path: &str) {
    let content = read_file(path);
    let buf = SourceBuffer::new(&content);
    let mut tokenizer = Tokenizer::new(&buf);

    let toks: Vec<_> = tokenizer.by_ref().collect();
    println!("Tokens for '{}' ({} tokens):", path, toks.len());
    for tok in &toks {
        println!("  {:>4}  {:<20} {:?} @ {}", tok.line, tok.kind.name(), tok.text, tok.span);
    }

    let anomalies = tokenizer.anomalies();
    if !anomalies.is_empty() {
        println!();
        println!("Anomalies:");
        for anomaly in anomalies {
            println!("  line {}: {:?} @ {}", anomaly.line, anomaly.kind, anomaly.span);
        }
    }
}
