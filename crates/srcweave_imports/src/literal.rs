//! Lexical helpers shared by the script and style-sheet grammars.

use srcweave_scanner::{is_identifier_part, ScanMode, Scanner};

/// Whether the keyword `word` starts at `pos` as a whole word.
pub(crate) fn keyword_at(text: &str, pos: usize, word: &str) -> bool {
    if !text[pos..].starts_with(word) {
        return false;
    }
    let before_ok = text[..pos]
        .chars()
        .next_back()
        .map_or(true, |prev| !is_identifier_part(prev) && prev != '.' && prev != '@');
    let after_ok = text[pos + word.len()..]
        .chars()
        .next()
        .map_or(true, |next| !is_identifier_part(next));
    before_ok && after_ok
}

/// Read the quoted string starting at `quote_pos`.
///
/// Returns the raw contents and the offset just past the closing quote, or
/// `None` when the string is not terminated on its line.
pub(crate) fn read_quoted(text: &str, quote_pos: usize) -> Option<(&str, usize)> {
    let mut scanner = Scanner::starting_at(text, quote_pos);
    let step = scanner.step()?;
    let ScanMode::QuotedString { quote } = step.mode else {
        return None;
    };
    let end = step.end();
    // Ended at a line break or at the end of input without a closing quote.
    if step.len < 2 || text.as_bytes()[end - 1] != quote || scanner.mode() != ScanMode::Code {
        return None;
    }
    // A lone `\'` right before the line break is not a closing quote either.
    if text[..end - 1].ends_with('\\') && !text[..end - 1].ends_with("\\\\") {
        return None;
    }
    Some((&text[quote_pos + 1..end - 1], end))
}

/// Leading identifier of `text` and the remainder after it.
pub(crate) fn take_identifier(text: &str) -> Option<(&str, &str)> {
    let end = text
        .char_indices()
        .find(|&(_, ch)| !is_identifier_part(ch))
        .map_or(text.len(), |(i, _)| i);
    let ident = &text[..end];
    if srcweave_scanner::is_identifier(ident) {
        Some((ident, &text[end..]))
    } else {
        None
    }
}
