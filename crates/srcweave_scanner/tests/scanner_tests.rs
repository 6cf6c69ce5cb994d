//! Scanner integration tests.
//!
//! Verifies that code characters are reported only outside comments and
//! strings, and that every construct is consumed exactly once.

use pretty_assertions::assert_eq;
use srcweave_scanner::{scan_code, strip_comments, ScanMode, Scanner, Visit};

/// Helper: collect the code characters of `source` as a string.
fn code_text(source: &str) -> String {
    let mut scanner = Scanner::new(source);
    let mut out = String::new();
    while let Some(pos) = scanner.next_code() {
        out.push(source[pos..].chars().next().unwrap());
    }
    out
}

/// Helper: collect (mode, text) runs.
fn runs(source: &str) -> Vec<(ScanMode, &str)> {
    let mut scanner = Scanner::new(source);
    let mut out = Vec::new();
    while let Some(step) = scanner.step() {
        out.push((step.mode, &source[step.pos..step.end()]));
    }
    out
}

#[test]
fn test_empty_source() {
    assert_eq!(code_text(""), "");
    assert!(Scanner::new("").step().is_none());
}

#[test]
fn test_plain_code() {
    assert_eq!(code_text("a(b, c)"), "a(b, c)");
}

#[test]
fn test_line_comment_is_skipped() {
    assert_eq!(code_text("a // b(c)\nd"), "a \nd");
}

#[test]
fn test_block_comment_is_skipped() {
    assert_eq!(code_text("a /* b, c */ d"), "a  d");
}

#[test]
fn test_strings_are_skipped() {
    assert_eq!(code_text(r#"f('a,b', "c)", `d{`)"#), "f(, , )");
}

#[test]
fn test_comment_markers_inside_strings() {
    assert_eq!(code_text("x = '// not a comment'; y"), "x = ; y");
    assert_eq!(code_text("x = \"/* nor this */\"; y"), "x = ; y");
}

#[test]
fn test_quotes_inside_comments() {
    assert_eq!(code_text("a /* it's */ b // don't\nc"), "a  b \nc");
}

#[test]
fn test_escaped_quotes() {
    assert_eq!(code_text(r#"f('it\'s', "say \"hi\"")"#), "f(, )");
    assert_eq!(code_text(r"f(`a \` b`)"), "f()");
}

#[test]
fn test_template_spans_lines() {
    assert_eq!(code_text("a`x\ny`b"), "ab");
}

#[test]
fn test_quoted_string_ends_at_newline() {
    assert_eq!(code_text("'abc\nd"), "\nd");
}

#[test]
fn test_run_modes() {
    let source = "a/*c*/'s'`t`//l\n";
    assert_eq!(
        runs(source),
        vec![
            (ScanMode::Code, "a"),
            (ScanMode::BlockComment, "/*c*/"),
            (ScanMode::QuotedString { quote: b'\'' }, "'s'"),
            (ScanMode::TemplateString, "`t`"),
            (ScanMode::LineComment, "//l"),
            (ScanMode::Code, "\n"),
        ]
    );
}

#[test]
fn test_unterminated_constructs_end_silently() {
    let mut scanner = Scanner::new("a 'open");
    while scanner.step().is_some() {}
    assert_eq!(scanner.mode(), ScanMode::QuotedString { quote: b'\'' });

    let mut scanner = Scanner::new("a /* open");
    while scanner.step().is_some() {}
    assert_eq!(scanner.mode(), ScanMode::BlockComment);

    let mut scanner = Scanner::new("a `open");
    while scanner.step().is_some() {}
    assert_eq!(scanner.mode(), ScanMode::TemplateString);
}

#[test]
fn test_block_comment_opener_is_not_reused() {
    // `/*/` does not close itself.
    assert_eq!(code_text("a /*/ b */ c"), "a  c");
}

#[test]
fn test_non_ascii_code() {
    assert_eq!(code_text("é('ü') // ö\nß"), "é() \nß");
}

#[test]
fn test_skip_trivia() {
    let source = "  /* c */ // l\n  next";
    let mut scanner = Scanner::new(source);
    let pos = scanner.skip_trivia().unwrap();
    assert_eq!(&source[pos..], "next");
    assert_eq!(scanner.pos(), pos);
}

#[test]
fn test_scan_code_skip_and_stop() {
    let source = "abcdef";
    let mut seen = Vec::new();
    scan_code(source, |pos| {
        seen.push(pos);
        match pos {
            1 => Visit::SkipTo(4),
            4 => Visit::Stop,
            _ => Visit::Continue,
        }
    });
    assert_eq!(seen, vec![0, 1, 4]);
}

#[test]
fn test_strip_comments() {
    assert_eq!(
        strip_comments("{ a, /* b, */ c // d\n, 'e/*' }"),
        "{ a,   c  \n, 'e/*' }"
    );
}
