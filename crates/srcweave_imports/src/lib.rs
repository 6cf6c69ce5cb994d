//! srcweave_imports: Import declaration scanning.
//!
//! Finds script `import` declarations and style-sheet `@import` rules with
//! the character-mode scanner, so nothing inside comments or strings is
//! mistaken for a declaration. Each declaration contributes its bindings and
//! source range to an [`ImportRecord`] keyed by module path.
//!
//! [`rewrite_relative_imports`] is a separate, regex-based and best-effort
//! utility for re-basing relative specifiers when text moves between
//! directories; it is not used for scanning.

mod literal;
mod record;
mod rewrite;
mod script;
mod style;

pub use record::{BindingKind, ImportBinding, ImportRecord, ImportSyntax, ParsedImports};
pub use rewrite::rewrite_relative_imports;
pub use script::parse_script_imports;
pub use style::parse_style_imports;

/// Scan `text` with the grammar that fits `file_path`: files ending in one of
/// `style_extensions` use the style-sheet grammar, everything else the
/// script grammar.
pub fn parse_imports(text: &str, file_path: &str, style_extensions: &[String]) -> ParsedImports {
    if srcweave_path::has_extension(file_path, style_extensions) {
        parse_style_imports(text, file_path)
    } else {
        parse_script_imports(text, file_path)
    }
}
