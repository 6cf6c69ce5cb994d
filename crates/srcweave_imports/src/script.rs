//! Script `import` declarations.

use srcweave_core::TextRange;
use srcweave_path::is_relative_specifier;
use srcweave_scanner::{scan_code, strip_comments, Scanner, Visit};
use tracing::{debug, trace};

use crate::literal::{keyword_at, read_quoted, take_identifier};
use crate::record::{Declaration, ImportBinding, ImportSyntax, ParsedImports};

const IMPORT: &str = "import";

/// Scan script text for `import ... from '<path>'` and `import '<path>'`
/// declarations.
///
/// `import(...)`, `import.meta` and `import x = require(...)` are not
/// declarations and are passed over. A declaration missing its module string
/// is skipped and scanning resumes right after its `import` keyword.
pub fn parse_script_imports(text: &str, importer: &str) -> ParsedImports {
    let mut imports = ParsedImports::new(importer);
    scan_code(text, |pos| {
        if !keyword_at(text, pos, IMPORT) {
            return Visit::Continue;
        }
        match parse_declaration(text, pos) {
            Some(declaration) => {
                let resume = declaration.range.end as usize;
                let is_external = !is_relative_specifier(&declaration.module_path);
                imports.add(ImportSyntax::Script, declaration, is_external);
                Visit::SkipTo(resume)
            }
            None => {
                debug!(importer, offset = pos, "import keyword does not start a declaration");
                Visit::SkipTo(pos + IMPORT.len())
            }
        }
    });
    imports
}

fn parse_declaration(text: &str, start: usize) -> Option<Declaration> {
    let bytes = text.as_bytes();
    let mut scanner = Scanner::starting_at(text, start + IMPORT.len());
    let first = scanner.skip_trivia()?;

    match bytes[first] {
        b'\'' | b'"' => {
            let (module_path, end) = read_quoted(text, first)?;
            return Some(Declaration {
                module_path: module_path.to_string(),
                bindings: Vec::new(),
                range: TextRange::from_offsets(start, end),
                has_clause: false,
            });
        }
        b'(' | b'.' => {
            trace!(offset = start, "dynamic import or import.meta");
            return None;
        }
        _ => {}
    }

    let (from, quote) = find_from_clause(text, first)?;
    let (module_path, end) = read_quoted(text, quote)?;
    let clause = strip_comments(&text[first..from]);
    let bindings = parse_clause(&clause)?;

    Some(Declaration {
        module_path: module_path.to_string(),
        bindings,
        range: TextRange::from_offsets(start, end),
        has_clause: true,
    })
}

/// Locate the `from` keyword that ends the binding clause starting at
/// `clause_start`. Returns its offset and the offset of the module string.
fn find_from_clause(text: &str, clause_start: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut braces = 0i32;
    let mut scanner = Scanner::starting_at(text, clause_start);

    while let Some(step) = scanner.step() {
        // Quoted export names (`{ 'a-b' as c }`) only occur inside braces.
        if step.mode.is_string() {
            if braces > 0 {
                continue;
            }
            return None;
        }
        if !step.mode.is_code() {
            continue;
        }
        let pos = step.pos;
        match bytes[pos] {
            b'{' => braces += 1,
            b'}' => braces -= 1,
            b';' | b'=' | b'(' | b')' => return None,
            // A binding may itself be named `from`, so the keyword only ends
            // the clause once something precedes it.
            b'f' if braces == 0 && pos > clause_start && keyword_at(text, pos, "from") => {
                let mut after = Scanner::starting_at(text, pos + "from".len());
                if let Some(quote) = after.skip_trivia() {
                    if matches!(bytes[quote], b'\'' | b'"') {
                        return Some((pos, quote));
                    }
                }
            }
            _ if braces == 0 && keyword_at(text, pos, IMPORT) => return None,
            _ => {}
        }
    }
    None
}

/// Parse the binding clause between `import` and `from`.
fn parse_clause(clause: &str) -> Option<Vec<ImportBinding>> {
    let mut rest = clause.trim();
    let mut type_only = false;

    // `import type X from` marks every binding type-only, while in
    // `import type from` and `import type, { a } from` the default binding is
    // named `type`.
    if let Some(after) = rest.strip_prefix("type") {
        let trimmed = after.trim_start();
        let separated = trimmed.len() < after.len() || trimmed.starts_with(['{', '*']);
        if separated && !trimmed.is_empty() && !trimmed.starts_with(',') {
            type_only = true;
            rest = trimmed;
        }
    }

    let mut bindings = Vec::new();
    loop {
        if let Some(block) = rest.strip_prefix('{') {
            let close = code_offsets(block, b'}').next()?;
            parse_named_block(&block[..close], type_only, &mut bindings);
            rest = &block[close + 1..];
        } else if let Some(star) = rest.strip_prefix('*') {
            let after_as = star.trim_start().strip_prefix("as")?;
            if !after_as.starts_with(char::is_whitespace) {
                return None;
            }
            let (name, remainder) = take_identifier(after_as.trim_start())?;
            bindings.push(with_type_only(ImportBinding::namespace(name), type_only));
            rest = remainder;
        } else {
            let (name, remainder) = take_identifier(rest)?;
            bindings.push(with_type_only(ImportBinding::default_import(name), type_only));
            rest = remainder;
        }

        rest = rest.trim_start();
        if rest.is_empty() {
            return Some(bindings);
        }
        rest = rest.strip_prefix(',')?.trim_start();
    }
}

/// Parse the entries of `{ a, b as c, type D, default as E, 'f-g' as h }`.
/// Malformed entries are dropped; the rest of the block still counts.
fn parse_named_block(block: &str, type_only: bool, bindings: &mut Vec<ImportBinding>) {
    let mut start = 0;
    let ends = code_offsets(block, b',').chain(std::iter::once(block.len()));
    for end in ends {
        let entry = &block[start..end];
        start = end + 1;
        let Some(mut tokens) = entry_tokens(entry) else {
            trace!(entry, "unterminated quoted import name");
            continue;
        };
        let mut entry_type_only = type_only;
        if tokens.first() == Some(&"type") && matches!(tokens.len(), 2 | 4) {
            entry_type_only = true;
            tokens.remove(0);
        }

        let binding = match tokens.as_slice() {
            [] => continue,
            ["default", "as", local] => ImportBinding::default_import(*local),
            // A quoted name needs an alias to be bound locally.
            [name] if !is_quoted(name) => ImportBinding::named(*name),
            [name, "as", alias] => ImportBinding::named(*name).with_alias(*alias),
            _ => {
                trace!(entry, "malformed named import entry");
                continue;
            }
        };
        bindings.push(with_type_only(binding, entry_type_only));
    }
}

/// Whitespace-separated tokens of a named entry, keeping a leading quoted
/// name whole.
fn entry_tokens(entry: &str) -> Option<Vec<&str>> {
    let entry = entry.trim();
    if !is_quoted(entry) {
        return Some(entry.split_whitespace().collect());
    }
    let (_, end) = read_quoted(entry, 0)?;
    let mut tokens = vec![&entry[..end]];
    tokens.extend(entry[end..].split_whitespace());
    Some(tokens)
}

fn is_quoted(text: &str) -> bool {
    text.starts_with(['\'', '"'])
}

/// Offsets of the code byte `target` in `text`, skipping strings.
fn code_offsets(text: &str, target: u8) -> impl Iterator<Item = usize> + '_ {
    let mut scanner = Scanner::new(text);
    std::iter::from_fn(move || scanner.next_code()).filter(move |&pos| text.as_bytes()[pos] == target)
}

fn with_type_only(binding: ImportBinding, type_only: bool) -> ImportBinding {
    if type_only {
        binding.type_only()
    } else {
        binding
    }
}
