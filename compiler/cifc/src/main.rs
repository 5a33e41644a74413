//! CIF command-line tool.

use cifc::commands::{
    check_files, dump_file, format_file, get_key, lex_file, list_keys, query_file,
};
use cifc::tracing_setup::init_tracing;
use cifc::CliOptions;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let (options, rest) = match CliOptions::parse(&args[2..]) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    };

    match command.as_str() {
        "dump" => {
            let Some(path) = rest.first() else {
                eprintln!("Usage: cif dump <file.cif> [--json]");
                std::process::exit(1);
            };
            dump_file(path, &options);
        }
        "keys" => {
            let Some(path) = rest.first() else {
                eprintln!("Usage: cif keys <file.cif>");
                std::process::exit(1);
            };
            list_keys(path, &options);
        }
        "get" => {
            let [path, key] = rest.as_slice() else {
                eprintln!("Usage: cif get <file.cif> <key>");
                eprintln!("Example: cif get 1abc.cif _cell.length_a");
                std::process::exit(1);
            };
            get_key(path, key, &options);
        }
        "query" => {
            let Some(path) = rest.first() else {
                eprintln!("Usage: cif query <file.cif>");
                std::process::exit(1);
            };
            query_file(path, &options);
        }
        "check" => {
            if rest.is_empty() {
                eprintln!("Usage: cif check <files...> [--limit=<n>]");
                std::process::exit(1);
            }
            check_files(&rest, &options);
        }
        "lex" => {
            let Some(path) = rest.first() else {
                eprintln!("Usage: cif lex <file.cif>");
                std::process::exit(1);
            };
            lex_file(path);
        }
        "fmt" => {
            let Some(path) = rest.first() else {
                eprintln!("Usage: cif fmt <file.cif>");
                std::process::exit(1);
            };
            format_file(path, &options);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("cif {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("CIF file inspector");
    println!();
    println!("Usage: cif <command> [options]");
    println!();
    println!("Commands:");
    println!("  dump <file.cif>         Print every key and value");
    println!("  keys <file.cif>         List keys in document order");
    println!("  get <file.cif> <key>    Print the value under a key");
    println!("  query <file.cif>        Look up keys interactively");
    println!("  check <files...>        Report diagnostics (files parsed in parallel)");
    println!("  fmt <file.cif>          Re-serialize with minimal quoting");
    println!("  lex <file.cif>          Tokenize and display tokens");
    println!("  help                    Show this help message");
    println!("  version                 Show version information");
    println!();
    println!("Options:");
    println!("  --json                  dump: print a JSON object");
    println!("  --limit=<n>             Keep at most n diagnostics per file (0 = all)");
    println!("  --quiet, -q             No diagnostic summary or logging");
    println!();
    println!("Reserved keys:");
    println!("  data_                   Block name from the data_ header");
    println!("  garbage_                Values that belong to no tag");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=cif_dict=debug cif dump file.cif");
}
