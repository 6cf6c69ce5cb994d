//! Character classification helpers.

use unicode_xid::UnicodeXID;

/// Whether `ch` can start an identifier (`$`, `_` or a Unicode XID start).
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_xid_start())
}

/// Whether `ch` can continue an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '$'
        || ch == '_'
        || ch.is_ascii_alphanumeric()
        || (!ch.is_ascii() && (ch.is_xid_continue() || ch == '\u{200C}' || ch == '\u{200D}'))
}

/// Whether `text` is a single identifier.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[inline]
pub fn is_white_space(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("foo"));
        assert!(is_identifier("$store"));
        assert!(is_identifier("_private1"));
        assert!(is_identifier("café"));
        assert!(!is_identifier("1abc"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a b"));
    }
}
