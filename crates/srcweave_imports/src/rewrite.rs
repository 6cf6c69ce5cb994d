//! Best-effort re-basing of relative import specifiers.
//!
//! This is plain regex substitution. It does not know about comments or
//! strings and may touch look-alikes inside them; use the scanners when
//! exact declarations matter.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use srcweave_path::{combine_paths, get_relative_path, normalize_path};

lazy_static! {
    /// `from './x'`, `import './x'`, `import('./x')`, `@import './x'` and
    /// `@import url('./x')`.
    static ref QUOTED_SPECIFIER: Regex = Regex::new(
        r#"(?P<head>\bfrom\s*|\bimport\s*\(?\s*|@import\s+(?:url\(\s*)?)(?P<quote>['"])(?P<spec>\.{1,2}/[^'"\n]*)['"]"#
    )
    .expect("valid quoted specifier pattern");

    /// `@import url(./x)`
    static ref UNQUOTED_URL: Regex = Regex::new(
        r#"(?P<head>@import\s+url\(\s*)(?P<spec>\.{1,2}/[^)'"\s]*)"#
    )
    .expect("valid unquoted url pattern");
}

/// Rewrite the relative specifiers of text that moves from `from_dir` to
/// `to_dir` so they keep pointing at the same files.
pub fn rewrite_relative_imports(text: &str, from_dir: &str, to_dir: &str) -> String {
    let rebase = |specifier: &str| {
        let target = normalize_path(&combine_paths(from_dir, specifier));
        get_relative_path(to_dir, &target)
    };

    let quoted = QUOTED_SPECIFIER.replace_all(text, |caps: &Captures| {
        let quote = &caps["quote"];
        format!("{}{}{}{}", &caps["head"], quote, rebase(&caps["spec"]), quote)
    });
    UNQUOTED_URL
        .replace_all(&quoted, |caps: &Captures| {
            format!("{}{}", &caps["head"], rebase(&caps["spec"]))
        })
        .into_owned()
}
