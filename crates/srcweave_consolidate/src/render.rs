//! Statement and provider text.

use rustc_hash::FxHashSet;
use std::fmt::Write;

use crate::plan::{ConsolidatedImportPlan, ModulePlan};

impl ConsolidatedImportPlan {
    /// The minimal import statements for the plan, one combined statement
    /// for each module's default and named bindings plus one per namespace.
    pub fn render_statements(&self) -> Vec<String> {
        let mut statements = Vec::new();
        for module in self.modules() {
            render_module(module, &mut statements);
        }
        statements
    }

    /// The import statements followed by an exported table mapping each
    /// module path to its bound runtime values.
    pub fn render_provider(&self, export_name: &str) -> String {
        let mut out = String::new();
        for statement in self.render_statements() {
            out.push_str(&statement);
            out.push('\n');
        }
        if !out.is_empty() {
            out.push('\n');
        }

        let entries: Vec<(String, String)> = self
            .modules()
            .filter_map(|module| provider_value(module).map(|value| (quote(&module.module), value)))
            .collect();
        if entries.is_empty() {
            let _ = writeln!(out, "export const {} = {{}};", export_name);
            return out;
        }

        let _ = writeln!(out, "export const {} = {{", export_name);
        for (key, value) in entries {
            let _ = writeln!(out, "  {}: {},", key, value);
        }
        out.push_str("};\n");
        out
    }
}

fn render_module(module: &ModulePlan, statements: &mut Vec<String>) {
    let source = quote(&module.module);
    if !module.has_bindings() {
        if module.side_effect {
            statements.push(format!("import {};", source));
        }
        return;
    }

    let mut clause = Vec::new();
    if let Some(default_name) = &module.default_name {
        clause.push(default_name.clone());
    }
    if !module.named.is_empty() {
        let named: Vec<String> = module
            .named
            .iter()
            .map(|n| {
                if n.is_renamed() {
                    format!("{} as {}", n.original, n.alias)
                } else {
                    n.alias.clone()
                }
            })
            .collect();
        clause.push(format!("{{ {} }}", named.join(", ")));
    }
    if !clause.is_empty() {
        statements.push(format!("import {} from {};", clause.join(", "), source));
    }

    for namespace in &module.namespaces {
        statements.push(format!("import * as {} from {};", namespace, source));
    }
}

/// The table value for one module: its namespace, or an object of its
/// default and named members. Side-effect modules have no value.
fn provider_value(module: &ModulePlan) -> Option<String> {
    let namespace = module.namespaces.first();
    if module.default_name.is_none() && module.named.is_empty() {
        return namespace.cloned();
    }

    let mut members = Vec::new();
    if let Some(namespace) = namespace {
        members.push(format!("...{}", namespace));
    }
    let mut keys = FxHashSet::default();
    if let Some(default_name) = &module.default_name {
        keys.insert("default");
        members.push(format!("default: {}", default_name));
    }
    for named in &module.named {
        if !keys.insert(named.original.as_str()) {
            continue;
        }
        if named.is_renamed() {
            members.push(format!("{}: {}", named.original, named.alias));
        } else {
            members.push(named.alias.clone());
        }
    }
    Some(format!("{{ {} }}", members.join(", ")))
}

/// Single-quoted string literal.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('\'');
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("./a"), "'./a'");
        assert_eq!(quote("it's"), "'it\\'s'");
    }
}
