//! Collection of call sites for a caller-chosen set of callee names.

use indexmap::IndexSet;
use srcweave_core::TextRange;
use srcweave_scanner::{is_identifier_part, is_identifier_start, scan_code, Scanner, Visit};
use tracing::debug;

use crate::element::ParsedElement;
use crate::parser::parse_arguments;
use crate::split::find_matching_close;

/// A call to a registered callee found in source text.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    pub callee: String,
    /// From the first character of the callee to the closing parenthesis.
    pub range: TextRange,
    /// Explicit type arguments (`callee<T>(...)`), if written.
    pub type_arguments: Option<Vec<ParsedElement>>,
    pub arguments: Vec<ParsedElement>,
}

/// Finds calls to a set of callee names.
///
/// The set of names is owned by the collector, so independent collectors
/// never observe each other's registrations.
#[derive(Debug, Clone, Default)]
pub struct CallSiteCollector {
    callees: IndexSet<String>,
}

impl CallSiteCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`CallSiteCollector::register`].
    pub fn with_callee(mut self, name: impl Into<String>) -> Self {
        self.register(name);
        self
    }

    /// Register a callee. Dotted paths such as `React.createElement` are
    /// matched as a whole.
    pub fn register(&mut self, name: impl Into<String>) {
        self.callees.insert(name.into());
    }

    pub fn callees(&self) -> impl Iterator<Item = &str> {
        self.callees.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.callees.is_empty()
    }

    /// Collect the outermost calls to registered callees, in source order.
    ///
    /// Member calls (`obj.callee(...)`) and declarations
    /// (`function callee(...)`) are not call sites.
    pub fn collect(&self, source: &str) -> Vec<CallSite> {
        let mut sites = Vec::new();
        if self.callees.is_empty() {
            return sites;
        }

        scan_code(source, |pos| {
            let Some(ch) = source[pos..].chars().next() else {
                return Visit::Stop;
            };
            if !is_identifier_start(ch) || !starts_word(source, pos) {
                return Visit::Continue;
            }
            let name_end = dotted_path_end(source, pos);
            let name = &source[pos..name_end];
            if !self.callees.contains(name) || follows_function_keyword(source, pos) {
                return Visit::SkipTo(name_end);
            }
            match call_at(source, name, pos, name_end) {
                Some(site) => {
                    debug!(callee = name, range = %site.range, "collected call site");
                    let resume = site.range.end as usize;
                    sites.push(site);
                    Visit::SkipTo(resume)
                }
                None => Visit::SkipTo(name_end),
            }
        });
        sites
    }
}

/// Whether the identifier at `pos` is not the tail of a longer identifier or
/// a member access.
fn starts_word(source: &str, pos: usize) -> bool {
    match source[..pos].chars().next_back() {
        Some(prev) => prev != '.' && !is_identifier_part(prev),
        None => true,
    }
}

fn dotted_path_end(source: &str, start: usize) -> usize {
    let mut end = start;
    let mut expect_start = true;
    for (offset, ch) in source[start..].char_indices() {
        let ok = if expect_start {
            is_identifier_start(ch)
        } else {
            is_identifier_part(ch) || ch == '.'
        };
        if !ok {
            break;
        }
        expect_start = ch == '.';
        if !expect_start {
            end = start + offset + ch.len_utf8();
        }
    }
    end
}

fn follows_function_keyword(source: &str, pos: usize) -> bool {
    let before = source[..pos].trim_end();
    before.ends_with("function")
        && !before[..before.len() - "function".len()]
            .chars()
            .next_back()
            .is_some_and(is_identifier_part)
}

fn call_at(source: &str, name: &str, start: usize, name_end: usize) -> Option<CallSite> {
    let bytes = source.as_bytes();
    let mut scanner = Scanner::starting_at(source, name_end);
    let mut open = scanner.skip_trivia()?;

    let type_arguments = if bytes[open] == b'<' {
        let close = find_matching_close(source, open)?;
        let type_args = parse_arguments(&source[open + 1..close]);
        scanner.skip_to(close + 1);
        open = scanner.skip_trivia()?;
        Some(type_args)
    } else {
        None
    };

    if bytes[open] != b'(' {
        return None;
    }
    let close = find_matching_close(source, open)?;
    Some(CallSite {
        callee: name.to_string(),
        range: TextRange::from_offsets(start, close + 1),
        type_arguments,
        arguments: parse_arguments(&source[open + 1..close]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_path_end() {
        let source = "React.createElement(x)";
        assert_eq!(&source[..dotted_path_end(source, 0)], "React.createElement");
        let source = "a.(b)";
        assert_eq!(&source[..dotted_path_end(source, 0)], "a");
    }

    #[test]
    fn test_follows_function_keyword() {
        let source = "function defineArgs(a) {}";
        assert!(follows_function_keyword(source, 9));
        let source = "myfunction defineArgs(a)";
        assert!(!follows_function_keyword(source, 11));
    }
}
