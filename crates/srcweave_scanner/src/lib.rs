//! srcweave_scanner: Character-mode tracker for C-family source text.
//!
//! The scanner does not tokenize. It only knows whether each run of source
//! text is code, a line comment, a block comment, a quoted string or a
//! template string, which is all the argument and import parsers need to
//! avoid matching inside comments and strings:
//! - `//` and `/* */` comments
//! - `'` and `"` strings with backslash escapes, ending at an unescaped newline
//! - `` ` `` template strings with backslash escapes, spanning lines
//!
//! Unterminated comments and strings simply run to the end of the input.

mod char_codes;
mod scanner;

pub use char_codes::{
    is_identifier, is_identifier_part, is_identifier_start, is_line_break, is_white_space,
};
pub use scanner::{scan_code, strip_comments, ScanMode, ScanStep, Scanner, Visit};
