//! Import bindings and per-module records.

use indexmap::IndexMap;
use srcweave_core::TextRange;
use srcweave_path::{is_relative_specifier, resolve_against};
use std::fmt;

/// How a binding refers to the module's exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BindingKind {
    /// `import X from` or `import { default as X } from`
    Default,
    /// `import { x } from` or `import { x as y } from`
    Named,
    /// `import * as ns from`
    Namespace,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Default => write!(f, "default"),
            BindingKind::Named => write!(f, "named"),
            BindingKind::Namespace => write!(f, "namespace"),
        }
    }
}

/// A single binding introduced by an import declaration.
///
/// For default and namespace bindings `original_name` is the local name. For
/// named bindings it is the exported name and `alias` the local one, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportBinding {
    pub original_name: String,
    pub kind: BindingKind,
    pub alias: Option<String>,
    pub is_type_only: bool,
}

impl ImportBinding {
    pub fn new(kind: BindingKind, original_name: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            kind,
            alias: None,
            is_type_only: false,
        }
    }

    pub fn default_import(name: impl Into<String>) -> Self {
        Self::new(BindingKind::Default, name)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(BindingKind::Named, name)
    }

    pub fn namespace(name: impl Into<String>) -> Self {
        Self::new(BindingKind::Namespace, name)
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn type_only(mut self) -> Self {
        self.is_type_only = true;
        self
    }

    /// The identifier this binding introduces in the importing file.
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.original_name)
    }
}

/// Which grammar a declaration was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportSyntax {
    Script,
    StyleSheet,
}

/// Every declaration of one module path within the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub module_path: String,
    pub syntax: ImportSyntax,
    pub is_external: bool,
    pub bindings: Vec<ImportBinding>,
    /// Ranges of the declarations, from the `import` keyword to the closing
    /// quote or parenthesis of the module path.
    pub source_positions: Vec<TextRange>,
    /// Whether some declaration imported the module for its side effects
    /// only (no binding clause). Style-sheet imports always are.
    pub side_effect: bool,
    /// For relative modules scanned with a known importer: the module path
    /// joined onto the importer's directory and normalized.
    pub absolute_specifier: Option<String>,
    /// Concrete file, set once resolution succeeded. Never set on external
    /// modules.
    pub resolved_path: Option<String>,
}

impl ImportRecord {
    pub fn new(module_path: impl Into<String>, syntax: ImportSyntax, is_external: bool) -> Self {
        Self {
            module_path: module_path.into(),
            syntax,
            is_external,
            bindings: Vec::new(),
            source_positions: Vec::new(),
            side_effect: false,
            absolute_specifier: None,
            resolved_path: None,
        }
    }

    /// A script import record for `module_path`, classified by its specifier.
    pub fn script(module_path: impl Into<String>) -> Self {
        let module_path = module_path.into();
        let is_external = !is_relative_specifier(&module_path);
        Self::new(module_path, ImportSyntax::Script, is_external)
    }

    pub fn with_binding(mut self, binding: ImportBinding) -> Self {
        self.bindings.push(binding);
        self
    }

    #[inline]
    pub fn is_relative(&self) -> bool {
        !self.is_external
    }

    /// Record the concrete file this module resolved to. Ignored for
    /// external modules.
    pub fn attach_resolution(&mut self, resolved_path: impl Into<String>) {
        if self.is_relative() {
            self.resolved_path = Some(resolved_path.into());
        }
    }

    /// Bindings that exist at runtime.
    pub fn runtime_bindings(&self) -> impl Iterator<Item = &ImportBinding> {
        self.bindings.iter().filter(|b| !b.is_type_only)
    }
}

/// One declaration found by a grammar, before it is merged into a record.
#[derive(Debug, Clone)]
pub(crate) struct Declaration {
    pub module_path: String,
    pub bindings: Vec<ImportBinding>,
    pub range: TextRange,
    pub has_clause: bool,
}

/// The import records of one file, keyed by module path in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedImports {
    importer: String,
    records: IndexMap<String, ImportRecord>,
}

impl ParsedImports {
    pub fn new(importer: impl Into<String>) -> Self {
        Self {
            importer: importer.into(),
            records: IndexMap::new(),
        }
    }

    /// The path of the scanned file.
    pub fn importer(&self) -> &str {
        &self.importer
    }

    pub(crate) fn add(&mut self, syntax: ImportSyntax, declaration: Declaration, is_external: bool) {
        let importer = &self.importer;
        let record = self
            .records
            .entry(declaration.module_path.clone())
            .or_insert_with(|| {
                let mut record =
                    ImportRecord::new(declaration.module_path.clone(), syntax, is_external);
                if !is_external && !importer.is_empty() {
                    record.absolute_specifier =
                        Some(resolve_against(importer, &declaration.module_path));
                }
                record
            });
        record.bindings.extend(declaration.bindings);
        record.source_positions.push(declaration.range);
        if !declaration.has_clause {
            record.side_effect = true;
        }
    }

    pub fn get(&self, module_path: &str) -> Option<&ImportRecord> {
        self.records.get(module_path)
    }

    pub fn get_mut(&mut self, module_path: &str) -> Option<&mut ImportRecord> {
        self.records.get_mut(module_path)
    }

    pub fn records(&self) -> impl Iterator<Item = &ImportRecord> {
        self.records.values()
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut ImportRecord> {
        self.records.values_mut()
    }

    /// Records whose module path is resolved against the importing file.
    pub fn relative(&self) -> impl Iterator<Item = &ImportRecord> {
        self.records().filter(|r| r.is_relative())
    }

    /// Records naming external packages or network locations.
    pub fn external(&self) -> impl Iterator<Item = &ImportRecord> {
        self.records().filter(|r| r.is_external)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ImportRecord> {
        self.records.into_values().collect()
    }
}
