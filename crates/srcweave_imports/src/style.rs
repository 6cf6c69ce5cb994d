//! Style-sheet `@import` rules.

use srcweave_core::TextRange;
use srcweave_path::{ensure_relative_marker, is_network_locator};
use srcweave_scanner::{is_identifier_part, scan_code, Scanner, Visit};
use tracing::debug;

use crate::literal::read_quoted;
use crate::record::{Declaration, ImportSyntax, ParsedImports};

const AT_IMPORT: &str = "@import";

/// Scan style-sheet text for `@import '<path>'`, `@import url('<path>')` and
/// `@import url(<path>)` rules.
///
/// Only network locators are external; every other path is relative and
/// gains a leading `./` when it has no relative marker. A rule whose string
/// or `url(` is not closed is skipped.
pub fn parse_style_imports(text: &str, importer: &str) -> ParsedImports {
    let mut imports = ParsedImports::new(importer);
    scan_code(text, |pos| {
        if !at_import(text, pos) {
            return Visit::Continue;
        }
        match parse_rule(text, pos) {
            Some((path, end)) => {
                let is_external = is_network_locator(&path);
                let module_path = if is_external {
                    path
                } else {
                    ensure_relative_marker(&path)
                };
                let declaration = Declaration {
                    module_path,
                    bindings: Vec::new(),
                    range: TextRange::from_offsets(pos, end),
                    has_clause: false,
                };
                imports.add(ImportSyntax::StyleSheet, declaration, is_external);
                Visit::SkipTo(end)
            }
            None => {
                debug!(importer, offset = pos, "skipped malformed @import");
                Visit::SkipTo(pos + AT_IMPORT.len())
            }
        }
    });
    imports
}

fn at_import(text: &str, pos: usize) -> bool {
    text[pos..].starts_with(AT_IMPORT)
        && !text[pos + AT_IMPORT.len()..]
            .chars()
            .next()
            .is_some_and(|next| is_identifier_part(next) || next == '-')
}

/// The module path of the rule at `start` and the offset just past it.
fn parse_rule(text: &str, start: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let mut scanner = Scanner::starting_at(text, start + AT_IMPORT.len());
    let first = scanner.skip_trivia()?;

    let (path, end) = if matches!(bytes[first], b'\'' | b'"') {
        let (path, end) = read_quoted(text, first)?;
        (path.trim(), end)
    } else if text
        .get(first..first + 4)
        .is_some_and(|head| head.eq_ignore_ascii_case("url("))
    {
        parse_url(text, first + 4)?
    } else {
        return None;
    };

    if path.is_empty() {
        return None;
    }
    Some((path.to_string(), end))
}

/// Parse the inside of `url(` starting at `inner`, through the closing `)`.
fn parse_url(text: &str, inner: usize) -> Option<(&str, usize)> {
    let bytes = text.as_bytes();
    let rest = &text[inner..];
    let leading = rest.len() - rest.trim_start().len();
    let first = inner + leading;

    if matches!(bytes.get(first), Some(b'\'' | b'"')) {
        let (path, after_quote) = read_quoted(text, first)?;
        let tail = &text[after_quote..];
        let close = after_quote + (tail.len() - tail.trim_start().len());
        if bytes.get(close) != Some(&b')') {
            return None;
        }
        return Some((path.trim(), close + 1));
    }

    // Unquoted: everything up to `)` on the same line.
    let line_end = rest.find(['\n', ';']).unwrap_or(rest.len());
    let close = rest[..line_end].find(')')?;
    Some((rest[..close].trim(), inner + close + 1))
}
