//! `query`: interactive key lookup.

use std::io::{self, BufRead, Write};

use cif_dict::{CifDocument, Lookup};

use super::load;
use crate::CliOptions;

const PROMPT: &str = "Enter a key ('k' lists keys, 'q' quits): ";

/// Parse `path` and answer key lookups from stdin until `q` or EOF.
pub fn query_file(path: &str, options: &CliOptions) {
    let output = load(path, options);
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = run_query(&output.document, stdin.lock(), stdout.lock()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// The lookup loop, over any input and output.
///
/// `k` lists all keys, `q` (or end of input) quits. A scalar prints as-is,
/// a list prints one item per line, and an unknown key prints
/// `No such key found.`.
pub fn run_query<R: BufRead, W: Write>(doc: &CifDocument, input: R, mut out: W) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line?;
        let key = line.trim();

        match key {
            "q" => return Ok(()),
            "k" => {
                for key in doc.keys() {
                    writeln!(out, "{key}")?;
                }
            }
            "" => {}
            _ => match doc.lookup(key) {
                Some(Lookup::Value(value)) => writeln!(out, "{value}")?,
                Some(Lookup::List(values)) => {
                    for value in values {
                        writeln!(out, "{value}")?;
                    }
                }
                None => writeln!(out, "No such key found.")?,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session(source: &str, input: &str) -> String {
        let doc = cif_dict::parse(source).document;
        let mut out = Vec::new();
        let result = run_query(&doc, input.as_bytes(), &mut out);
        assert!(result.is_ok());
        String::from_utf8(out).unwrap_or_default()
    }

    #[test]
    fn looks_up_scalars_and_lists() {
        let out = session("data_x\n_a 1\nloop_\n_b\np q\n", "_a\n_b\nq\n");
        assert_eq!(out, format!("{PROMPT}1\n{PROMPT}p\nq\n{PROMPT}"));
    }

    #[test]
    fn lists_keys() {
        let out = session("data_x\n_a 1\n", "k\nq\n");
        assert_eq!(out, format!("{PROMPT}data_\n_a\ngarbage_\n{PROMPT}"));
    }

    #[test]
    fn unknown_key() {
        let out = session("_a 1\n", "_zzz\nq\n");
        assert_eq!(out, format!("{PROMPT}No such key found.\n{PROMPT}"));
    }

    #[test]
    fn ends_at_eof() {
        let out = session("_a 1\n", "");
        assert_eq!(out, format!("{PROMPT}\n"));
    }
}
