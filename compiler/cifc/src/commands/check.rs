//! `check`: parse files in parallel and render their diagnostics.

use std::io::{self, IsTerminal, Write};
use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use cif_dict::{parse_with_config, read_source, Diagnostic, ParseOutput, ReadError, Severity};
use rayon::prelude::*;

use crate::CliOptions;

/// Parse every file in parallel, then report in argument order.
///
/// Exits with status 1 if any file is unreadable or has warnings.
#[tracing::instrument(level = "debug", skip_all, fields(files = paths.len()))]
pub fn check_files(paths: &[String], options: &CliOptions) {
    let config = options.dict_config();
    let results: Vec<(String, Result<(String, ParseOutput), ReadError>)> = paths
        .par_iter()
        .map(|path| {
            let result = read_source(path).map(|source| {
                let output = parse_with_config(&source, &config);
                (source, output)
            });
            (path.clone(), result)
        })
        .collect();

    let color = io::stderr().is_terminal();
    let mut failed = false;
    for (path, result) in &results {
        match result {
            Ok((source, output)) => {
                let stderr = io::stderr();
                if let Err(err) = render_diagnostics(path, source, output, color, stderr.lock()) {
                    eprintln!("error: cannot write report: {err}");
                }
                let warnings = output
                    .diagnostics
                    .iter()
                    .filter(|d| d.severity() == Severity::Warning)
                    .count();
                failed |= warnings > 0 || output.suppressed_diagnostics > 0;
                println!("{}", summary_line(path, output));
            }
            Err(err) => {
                eprintln!("error: {err}");
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// One line per file: tag count and diagnostic count.
fn summary_line(path: &str, output: &ParseOutput) -> String {
    let doc = &output.document;
    let mut line = format!(
        "{path}: {} tags, {} garbage values, {} diagnostics",
        doc.len(),
        doc.garbage().len(),
        output.diagnostics.len()
    );
    if output.suppressed_diagnostics > 0 {
        line.push_str(&format!(" ({} more suppressed)", output.suppressed_diagnostics));
    }
    line
}

/// Write every diagnostic in `output` as an `ariadne` report.
pub fn render_diagnostics<W: Write>(
    path: &str,
    source: &str,
    output: &ParseOutput,
    color: bool,
    mut out: W,
) -> io::Result<()> {
    for diag in &output.diagnostics {
        build_report(path, source, diag, color).write((path, Source::from(source)), &mut out)?;
    }
    Ok(())
}

fn build_report<'a>(
    path: &'a str,
    source: &str,
    diag: &Diagnostic,
    color: bool,
) -> Report<'a, (&'a str, Range<usize>)> {
    let (kind, label_color) = match diag.severity() {
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
        Severity::Note => (ReportKind::Advice, Color::Cyan),
    };
    let range = char_range(source, diag.span.to_range());

    let mut report = Report::build(kind, path, range.start)
        .with_config(Config::default().with_color(color))
        .with_code(diag.code())
        .with_message(diag.message())
        .with_label(
            Label::new((path, range))
                .with_message(format!("line {}", diag.line))
                .with_color(label_color),
        );
    if let Some(help) = diag.help() {
        report = report.with_help(help);
    }
    report.finish()
}

/// `ariadne` counts characters, diagnostics count bytes.
fn char_range(source: &str, bytes: Range<usize>) -> Range<usize> {
    let to_char = |offset: usize| {
        let offset = offset.min(source.len());
        source
            .char_indices()
            .take_while(|&(i, _)| i < offset)
            .count()
    };
    to_char(bytes.start)..to_char(bytes.end)
}
