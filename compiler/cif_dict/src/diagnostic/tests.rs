use super::*;
use pretty_assertions::assert_eq;

fn diag(kind: DiagnosticKind, start: u32) -> Diagnostic {
    Diagnostic::new(kind, Span::new(start, start + 1), 1)
}

#[test]
fn test_code_display() {
    assert_eq!(DiagnosticCode::W0001.to_string(), "W0001");
    assert_eq!(DiagnosticCode::W1003.as_str(), "W1003");
}

#[test]
fn test_code_from_str() {
    assert_eq!("w1002".parse::<DiagnosticCode>(), Ok(DiagnosticCode::W1002));
    assert_eq!("W0005".parse::<DiagnosticCode>(), Ok(DiagnosticCode::W0005));
    assert_eq!("E0001".parse::<DiagnosticCode>(), Err(()));
}

#[test]
fn test_code_layers_are_exclusive() {
    for code in DiagnosticCode::ALL {
        assert_ne!(code.is_lexical(), code.is_structural(), "{code}");
    }
    assert!(DiagnosticCode::W0004.is_lexical());
    assert!(DiagnosticCode::W1001.is_structural());
}

#[test]
fn test_every_kind_has_distinct_code() {
    let kinds = [
        DiagnosticKind::InvalidByte { byte: 1 },
        DiagnosticKind::InteriorNull,
        DiagnosticKind::ByteOrderMark,
        DiagnosticKind::UnterminatedQuote { quote: '\'' },
        DiagnosticKind::UnterminatedTextField,
        DiagnosticKind::OrphanValue {
            value: "x".to_owned(),
        },
        DiagnosticKind::MissingValue {
            tag: "_a".to_owned(),
            found: TokenKind::TagName,
        },
        DiagnosticKind::RaggedLoop {
            columns: 2,
            values: 3,
        },
        DiagnosticKind::EmptyLoop { columns: 2 },
        DiagnosticKind::LoopWithoutTags,
    ];
    let codes: Vec<DiagnosticCode> = kinds.into_iter().map(|k| diag(k, 0).code()).collect();
    assert_eq!(codes, DiagnosticCode::ALL.to_vec());
}

#[test]
fn test_severity() {
    assert_eq!(diag(DiagnosticKind::ByteOrderMark, 0).severity(), Severity::Note);
    assert_eq!(
        diag(DiagnosticKind::LoopWithoutTags, 0).severity(),
        Severity::Warning
    );
    assert_eq!(Severity::Note.to_string(), "note");
}

#[test]
fn test_messages() {
    assert_eq!(
        diag(DiagnosticKind::InvalidByte { byte: 0x1b }, 0).message(),
        "invalid byte 0x1B skipped"
    );
    assert_eq!(
        diag(
            DiagnosticKind::MissingValue {
                tag: "_a".to_owned(),
                found: TokenKind::LoopMarker,
            },
            0
        )
        .message(),
        "tag `_a` has no value (found loop marker)"
    );
    assert_eq!(
        diag(
            DiagnosticKind::MissingValue {
                tag: "_a".to_owned(),
                found: TokenKind::Eof,
            },
            0
        )
        .message(),
        "tag `_a` has no value (found end of input)"
    );
    assert_eq!(
        diag(
            DiagnosticKind::RaggedLoop {
                columns: 3,
                values: 7,
            },
            0
        )
        .message(),
        "loop has 7 values for 3 columns; last row is missing 2"
    );
    assert_eq!(
        diag(DiagnosticKind::UnterminatedQuote { quote: '"' }, 0).message(),
        "unterminated \"-quoted value"
    );
}

#[test]
fn test_orphan_value_is_abbreviated() {
    let long = "x".repeat(60);
    let message = diag(DiagnosticKind::orphan_value(&long), 0).message();
    assert_eq!(message, format!("value `{}...` has no tag", "x".repeat(40)));

    let multi = diag(DiagnosticKind::orphan_value("first\nsecond\n"), 0);
    assert_eq!(multi.message(), "value `first...` has no tag");

    let short = diag(DiagnosticKind::orphan_value("stray"), 0);
    assert_eq!(short.message(), "value `stray` has no tag");
}

#[test]
fn test_help_present_except_bom() {
    assert_eq!(diag(DiagnosticKind::ByteOrderMark, 0).help(), None);
    assert!(diag(DiagnosticKind::EmptyLoop { columns: 1 }, 0).help().is_some());
}

#[test]
fn test_display() {
    let d = Diagnostic::new(DiagnosticKind::LoopWithoutTags, Span::new(4, 9), 3);
    assert_eq!(d.to_string(), "warning[W1005] line 3: loop declares no tags");
}

#[test]
fn test_from_lex_anomaly() {
    let anomaly = LexAnomaly {
        kind: LexAnomalyKind::UnterminatedQuote { quote: b'\'' },
        span: Span::new(2, 7),
        line: 4,
    };
    assert_eq!(
        Diagnostic::from(anomaly),
        Diagnostic::new(
            DiagnosticKind::UnterminatedQuote { quote: '\'' },
            Span::new(2, 7),
            4
        )
    );
}

#[test]
fn test_sink_sorts_by_position() {
    let mut sink = DiagnosticSink::new(0, false);
    sink.push(diag(DiagnosticKind::LoopWithoutTags, 9));
    sink.push(diag(DiagnosticKind::InteriorNull, 2));
    sink.push(diag(DiagnosticKind::ByteOrderMark, 5));
    let (kept, suppressed) = sink.finish();
    let starts: Vec<u32> = kept.iter().map(|d| d.span.start).collect();
    assert_eq!(starts, vec![2, 5, 9]);
    assert_eq!(suppressed, 0);
}

#[test]
fn test_sink_applies_limit_after_sorting() {
    let mut sink = DiagnosticSink::new(2, false);
    for start in [30, 10, 20, 40] {
        sink.push(diag(DiagnosticKind::InteriorNull, start));
    }
    let (kept, suppressed) = sink.finish();
    let starts: Vec<u32> = kept.iter().map(|d| d.span.start).collect();
    assert_eq!(starts, vec![10, 20]);
    assert_eq!(suppressed, 2);
}
