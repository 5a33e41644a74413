//! `dump`, `keys` and `get`: print a parsed document.

use std::fmt::Write as _;

use cif_dict::Lookup;

use super::load;
use crate::CliOptions;

/// Print every key and value, as text or (`--json`) as a JSON object.
pub fn dump_file(path: &str, options: &CliOptions) {
    let output = load(path, options);
    let doc = &output.document;

    if options.json {
        match serde_json::to_string_pretty(doc) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: cannot serialize '{path}': {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    for key in doc.keys() {
        if let Some(lookup) = doc.lookup(key) {
            print!("{}", format_lookup(key, lookup));
        }
    }
}

/// Print every key, one per line.
pub fn list_keys(path: &str, options: &CliOptions) {
    let output = load(path, options);
    for key in output.document.keys() {
        println!("{key}");
    }
}

/// Print the value under `key`: a scalar as-is, a list one item per line.
pub fn get_key(path: &str, key: &str, options: &CliOptions) {
    let output = load(path, options);
    match output.document.lookup(key) {
        Some(Lookup::Value(value)) => println!("{value}"),
        Some(Lookup::List(values)) => {
            for value in values {
                println!("{value}");
            }
        }
        None => {
            eprintln!("No such key found.");
            std::process::exit(1);
        }
    }
}

/// Render one key for `dump`. Values are debug-quoted so blanks and line
/// breaks stay visible.
pub fn format_lookup(key: &str, lookup: Lookup<'_>) -> String {
    let mut out = String::new();
    match lookup {
        Lookup::Value(value) => {
            let _ = writeln!(out, "{key} = {value:?}");
        }
        Lookup::List(values) => {
            let _ = writeln!(out, "{key} = [{} values]", values.len());
            for (i, value) in values.iter().enumerate() {
                let _ = writeln!(out, "  {i}: {value:?}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_scalar() {
        assert_eq!(
            format_lookup("_title", Lookup::Value("two\nlines")),
            "_title = \"two\\nlines\"\n"
        );
    }

    #[test]
    fn formats_list() {
        let values = vec!["1".to_owned(), "a b".to_owned()];
        assert_eq!(
            format_lookup("_col", Lookup::List(&values)),
            "_col = [2 values]\n  0: \"1\"\n  1: \"a b\"\n"
        );
    }

    #[test]
    fn formats_empty_list() {
        assert_eq!(format_lookup("garbage_", Lookup::List(&[])), "garbage_ = [0 values]\n");
    }
}
