//! Depth tracking over `()`, `{}`, `[]` and `<>`.
//!
//! Only code characters count. `>` closes a level unless it is the second
//! half of `=>`. Depth never drops below zero, so a stray closer (a `>`
//! comparison, say) cannot push the rest of the text out of the top level.

use srcweave_scanner::{is_white_space, Scanner};

/// Depth change caused by the code byte at `pos`.
#[inline]
pub(crate) fn depth_delta(bytes: &[u8], pos: usize) -> i32 {
    match bytes[pos] {
        b'(' | b'{' | b'[' | b'<' => 1,
        b')' | b'}' | b']' => -1,
        b'>' if pos > 0 && bytes[pos - 1] == b'=' => 0,
        b'>' => -1,
        _ => 0,
    }
}

/// Split `text` at commas that occur at nesting depth zero.
///
/// Segments lose their leading and trailing white space and comments, and
/// empty segments are dropped, so a trailing comma or an empty list produces
/// no element.
pub fn split_top_level(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    let mut scanner = Scanner::new(text);
    while let Some(pos) = scanner.next_code() {
        if bytes[pos] == b',' && depth == 0 {
            push_segment(&mut segments, &text[start..pos]);
            start = pos + 1;
        } else {
            depth = (depth + depth_delta(bytes, pos)).max(0);
        }
    }
    push_segment(&mut segments, &text[start..]);
    segments
}

fn push_segment<'t>(segments: &mut Vec<&'t str>, segment: &'t str) {
    let segment = trim_trivia(segment);
    if !segment.is_empty() {
        segments.push(segment);
    }
}

/// `text` without leading and trailing white space and comments.
///
/// A segment must never end inside a line comment: joined back onto one line
/// it would comment out everything after it.
pub(crate) fn trim_trivia(text: &str) -> &str {
    let mut start = None;
    let mut end = 0;
    let mut scanner = Scanner::new(text);
    while let Some(step) = scanner.step() {
        let run = &text[step.pos..step.end()];
        let is_trivia = step.mode.is_comment()
            || (step.mode.is_code() && run.chars().all(is_white_space));
        if !is_trivia {
            start.get_or_insert(step.pos);
            end = step.end();
        }
    }
    start.map_or("", |start| &text[start..end])
}

/// Offset of the bracket closing the one at `open`.
///
/// All four bracket kinds share one depth counter. Returns `None` when the
/// text ends first.
pub fn find_matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if !matches!(bytes.get(open), Some(b'(' | b'{' | b'[' | b'<')) {
        return None;
    }
    let mut depth = 0i32;
    let mut scanner = Scanner::starting_at(text, open);
    while let Some(pos) = scanner.next_code() {
        depth += depth_delta(bytes, pos);
        if depth <= 0 {
            return Some(pos);
        }
    }
    None
}

/// Offsets where `needle` starts at nesting depth zero, in code only.
pub(crate) fn find_top_level(text: &str, needle: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut depth = 0i32;

    let mut scanner = Scanner::new(text);
    while let Some(pos) = scanner.next_code() {
        if depth == 0 && text[pos..].starts_with(needle) {
            found.push(pos);
        }
        depth = (depth + depth_delta(bytes, pos)).max(0);
    }
    found
}

/// First code offset of `target`, regardless of depth.
pub(crate) fn find_first_code(text: &str, target: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut scanner = Scanner::new(text);
    while let Some(pos) = scanner.next_code() {
        if bytes[pos] == target {
            return Some(pos);
        }
    }
    None
}

/// Whether `text` is enclosed as a whole by the bracket `open` and its match.
pub(crate) fn is_wrapped(text: &str, open: u8) -> bool {
    text.as_bytes().first() == Some(&open)
        && find_matching_close(text, 0) == Some(text.len() - 1)
}
