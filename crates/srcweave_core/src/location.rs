//! Human-readable source locations.
//!
//! Ranges are byte offsets; people read `line:column`. Lines and columns are
//! 1-based and columns count characters, so a location printed for a line
//! holding non-ASCII text points at the same place an editor does.

use memchr::memchr_iter;
use std::fmt;

use crate::text::TextPos;

/// A 1-based line and character column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line starts of one source text, for turning offsets into locations.
#[derive(Debug, Clone)]
pub struct LineIndex<'t> {
    text: &'t str,
    line_starts: Vec<usize>,
}

impl<'t> LineIndex<'t> {
    pub fn new(text: &'t str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(memchr_iter(b'\n', text.as_bytes()).map(|i| i + 1))
            .collect();
        Self { text, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Location of the byte offset `pos`. Offsets past the end clamp to the
    /// end of the text; an offset inside a multi-byte character counts as
    /// that character.
    pub fn locate(&self, pos: TextPos) -> SourceLocation {
        let pos = (pos as usize).min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= pos) - 1;
        let start = self.line_starts[line];
        let column = self.text.as_bytes()[start..pos]
            .iter()
            .filter(|&&b| (b as i8) >= -0x40)
            .count();
        SourceLocation {
            line: line as u32 + 1,
            column: column as u32 + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_lines() {
        let index = LineIndex::new("a\nbc\n\nd");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.locate(0), SourceLocation { line: 1, column: 1 });
        assert_eq!(index.locate(1), SourceLocation { line: 1, column: 2 });
        assert_eq!(index.locate(3), SourceLocation { line: 2, column: 2 });
        assert_eq!(index.locate(5), SourceLocation { line: 3, column: 1 });
        assert_eq!(index.locate(6).to_string(), "4:1");
    }

    #[test]
    fn test_locate_counts_characters() {
        let text = "const é = f();";
        let index = LineIndex::new(text);
        let call = text.find('f').unwrap() as TextPos;
        assert_eq!(index.locate(call), SourceLocation { line: 1, column: 11 });
    }

    #[test]
    fn test_locate_clamps_past_end() {
        let index = LineIndex::new("ab\n");
        assert_eq!(index.locate(99), SourceLocation { line: 2, column: 1 });
        assert_eq!(LineIndex::new("").locate(0).to_string(), "1:1");
    }
}
