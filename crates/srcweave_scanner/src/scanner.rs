//! The character-mode scanner.
//!
//! [`Scanner`] walks source text in runs. A code character is always its own
//! run; a comment or string is consumed as a single run including its
//! delimiters, so a delimiter seen while already inside one construct is
//! never taken as the start of another.

use memchr::{memchr, memchr2, memchr3, memmem};

/// What kind of text the scanner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Code,
    LineComment,
    BlockComment,
    /// A `'` or `"` string; `quote` is the delimiter that closes it.
    QuotedString { quote: u8 },
    TemplateString,
}

impl ScanMode {
    #[inline]
    pub fn is_code(self) -> bool {
        self == ScanMode::Code
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, ScanMode::LineComment | ScanMode::BlockComment)
    }

    #[inline]
    pub fn is_string(self) -> bool {
        matches!(self, ScanMode::QuotedString { .. } | ScanMode::TemplateString)
    }
}

/// One run of text sharing a single mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStep {
    /// Byte offset of the run.
    pub pos: usize,
    /// Byte length of the run.
    pub len: usize,
    pub mode: ScanMode,
}

impl ScanStep {
    #[inline]
    pub fn end(&self) -> usize {
        self.pos + self.len
    }
}

/// What a [`scan_code`] visitor wants to happen next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep scanning after the current character.
    Continue,
    /// Resume scanning in code mode at the given byte offset.
    SkipTo(usize),
    /// End the scan.
    Stop,
}

/// Tracks the scan mode across source text.
#[derive(Debug, Clone)]
pub struct Scanner<'s> {
    text: &'s str,
    pos: usize,
    /// Mode the scanner is left in. Only differs from `Code` after an
    /// unterminated comment or string ran to the end of the input.
    mode: ScanMode,
}

impl<'s> Scanner<'s> {
    /// Create a new scanner at the start of `text`.
    pub fn new(text: &'s str) -> Self {
        Self::starting_at(text, 0)
    }

    /// Create a scanner that starts in code mode at byte offset `pos`.
    pub fn starting_at(text: &'s str, pos: usize) -> Self {
        Self {
            text,
            pos: pos.min(text.len()),
            mode: ScanMode::Code,
        }
    }

    #[inline]
    pub fn text(&self) -> &'s str {
        self.text
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Jump to byte offset `pos` and resume in code mode.
    ///
    /// Offsets that do not fall on a `char` boundary are moved forward to the
    /// next boundary.
    pub fn skip_to(&mut self, pos: usize) {
        let mut pos = pos.min(self.text.len());
        while !self.text.is_char_boundary(pos) {
            pos += 1;
        }
        self.pos = pos;
        self.mode = ScanMode::Code;
    }

    /// Consume the next run of text.
    pub fn step(&mut self) -> Option<ScanStep> {
        if self.is_eof() {
            return None;
        }
        let bytes = self.text.as_bytes();
        let at = self.pos;
        let next = bytes.get(at + 1).copied();

        let (end, mode, left_open) = match bytes[at] {
            b'/' if next == Some(b'/') => {
                let end = memchr(b'\n', &bytes[at + 2..]).map_or(bytes.len(), |i| at + 2 + i);
                (end, ScanMode::LineComment, false)
            }
            b'/' if next == Some(b'*') => match memmem::find(&bytes[at + 2..], b"*/") {
                Some(i) => (at + 2 + i + 2, ScanMode::BlockComment, false),
                None => (bytes.len(), ScanMode::BlockComment, true),
            },
            quote @ (b'\'' | b'"') => {
                let (end, closed) = self.quoted_end(at + 1, quote);
                (end, ScanMode::QuotedString { quote }, !closed)
            }
            b'`' => {
                let (end, closed) = self.template_end(at + 1);
                (end, ScanMode::TemplateString, !closed)
            }
            _ => (at + self.char_len(at), ScanMode::Code, false),
        };

        self.pos = end;
        self.mode = if left_open { mode } else { ScanMode::Code };
        Some(ScanStep {
            pos: at,
            len: end - at,
            mode,
        })
    }

    /// Advance to the next character in code mode and return its offset.
    pub fn next_code(&mut self) -> Option<usize> {
        while let Some(step) = self.step() {
            if step.mode.is_code() {
                return Some(step.pos);
            }
        }
        None
    }

    /// Offset of the next code character, without consuming anything.
    pub fn peek_code(&self) -> Option<usize> {
        self.clone().next_code()
    }

    /// Skip white space and comments. Returns the offset of the first code
    /// character that is not white space, leaving the scanner on it.
    pub fn skip_trivia(&mut self) -> Option<usize> {
        loop {
            let mut probe = self.clone();
            let step = probe.step()?;
            let is_trivia = step.mode.is_comment()
                || (step.mode.is_code()
                    && self.text[step.pos..step.end()]
                        .chars()
                        .all(crate::is_white_space));
            if !is_trivia {
                return Some(step.pos);
            }
            *self = probe;
        }
    }

    /// Returns `(end, closed)` for a quoted string whose body starts at `from`.
    fn quoted_end(&self, from: usize, quote: u8) -> (usize, bool) {
        let bytes = self.text.as_bytes();
        let mut i = from;
        while i < bytes.len() {
            match memchr3(quote, b'\\', b'\n', &bytes[i..]) {
                Some(offset) => {
                    let found = i + offset;
                    match bytes[found] {
                        b'\\' => i = self.escape_end(found),
                        // A newline ends the string at the line break.
                        b'\n' => return (found, true),
                        _ => return (found + 1, true),
                    }
                }
                None => break,
            }
        }
        (bytes.len(), false)
    }

    fn template_end(&self, from: usize) -> (usize, bool) {
        let bytes = self.text.as_bytes();
        let mut i = from;
        while i < bytes.len() {
            match memchr2(b'`', b'\\', &bytes[i..]) {
                Some(offset) => {
                    let found = i + offset;
                    if bytes[found] == b'\\' {
                        i = self.escape_end(found);
                    } else {
                        return (found + 1, true);
                    }
                }
                None => break,
            }
        }
        (bytes.len(), false)
    }

    /// End of the escape sequence starting with the backslash at `backslash`.
    fn escape_end(&self, backslash: usize) -> usize {
        let escaped = backslash + 1;
        if escaped >= self.text.len() {
            return self.text.len();
        }
        escaped + self.char_len(escaped)
    }

    #[inline]
    fn char_len(&self, pos: usize) -> usize {
        self.text[pos..].chars().next().map_or(1, char::len_utf8)
    }
}

/// Run `visit` on every code character of `text`.
///
/// The visitor receives the byte offset of the character and decides whether
/// to continue, to jump past a construct it consumed itself, or to stop.
pub fn scan_code<F>(text: &str, mut visit: F)
where
    F: FnMut(usize) -> Visit,
{
    let mut scanner = Scanner::new(text);
    while let Some(pos) = scanner.next_code() {
        match visit(pos) {
            Visit::Continue => {}
            Visit::SkipTo(resume) => scanner.skip_to(resume.max(scanner.pos())),
            Visit::Stop => break,
        }
    }
}

/// Replace every comment in `text` with a single space. Strings are kept
/// verbatim.
pub fn strip_comments(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut scanner = Scanner::new(text);
    while let Some(step) = scanner.step() {
        if step.mode.is_comment() {
            result.push(' ');
        } else {
            result.push_str(&text[step.pos..step.end()]);
        }
    }
    result
}
