//! Building the consolidated plan.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use srcweave_imports::{BindingKind, ImportBinding, ImportRecord};
use tracing::{debug, trace};

use crate::allocator::{NameAllocator, DEFAULT_SUFFIX_MAX_LENGTH};

/// A named export imported under a unique local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImport {
    /// Exported name (`default` for a module's second default binding).
    pub original: String,
    /// Local name, unique across the plan.
    pub alias: String,
}

impl NamedImport {
    pub fn is_renamed(&self) -> bool {
        self.original != self.alias
    }
}

/// What one module contributes to the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePlan {
    pub module: String,
    pub default_name: Option<String>,
    pub named: Vec<NamedImport>,
    pub namespaces: Vec<String>,
    /// Imported only for its side effects: no runtime binding survived, but
    /// some declaration had no binding clause.
    pub side_effect: bool,
}

impl ModulePlan {
    fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
            default_name: None,
            named: Vec::new(),
            namespaces: Vec::new(),
            side_effect: false,
        }
    }

    pub fn has_bindings(&self) -> bool {
        self.default_name.is_some() || !self.named.is_empty() || !self.namespaces.is_empty()
    }
}

/// The deduplication key of a binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BindingKey {
    module: String,
    kind: BindingKind,
    original: String,
    alias: Option<String>,
}

impl BindingKey {
    fn new(module: &str, binding: &ImportBinding) -> Self {
        Self {
            module: module.to_string(),
            kind: binding.kind,
            original: binding.original_name.clone(),
            alias: binding.alias.clone(),
        }
    }
}

/// Merged import requirements of many files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedImportPlan {
    modules: IndexMap<String, ModulePlan>,
    names: FxHashMap<BindingKey, String>,
}

impl ConsolidatedImportPlan {
    /// Modules in the order they were first supplied.
    pub fn modules(&self) -> impl Iterator<Item = &ModulePlan> {
        self.modules.values()
    }

    pub fn module(&self, module: &str) -> Option<&ModulePlan> {
        self.modules.get(module)
    }

    /// The unique local name assigned to `binding` of `module`. Type-only
    /// and dropped bindings have none.
    pub fn local_name(&self, module: &str, binding: &ImportBinding) -> Option<&str> {
        self.names
            .get(&BindingKey::new(module, binding))
            .map(String::as_str)
    }

    /// Every local name handed out, in no particular order.
    pub fn local_names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Consolidation settings.
#[derive(Debug, Clone)]
pub struct Consolidator {
    reserved: Vec<String>,
    suffix_max_length: usize,
}

impl Default for Consolidator {
    fn default() -> Self {
        Self {
            reserved: Vec::new(),
            suffix_max_length: DEFAULT_SUFFIX_MAX_LENGTH,
        }
    }
}

impl Consolidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names that must never be assigned, such as identifiers the generated
    /// code declares itself.
    pub fn with_reserved<I, S>(mut self, reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(reserved.into_iter().map(Into::into));
        self
    }

    pub fn with_suffix_max_length(mut self, max_len: usize) -> Self {
        self.suffix_max_length = max_len;
        self
    }

    /// Merge `records` in the order given. The same input order always
    /// produces the same plan.
    pub fn consolidate<'r, I>(&self, records: I) -> ConsolidatedImportPlan
    where
        I: IntoIterator<Item = &'r ImportRecord>,
    {
        let mut builder = PlanBuilder {
            names: NameAllocator::with_reserved(self.reserved.iter().cloned()),
            suffix_max_length: self.suffix_max_length,
            seen: FxHashSet::default(),
            plan: ConsolidatedImportPlan::default(),
        };
        for record in records {
            builder.add_record(record);
        }
        builder.finish()
    }
}

/// Consolidate with default settings.
pub fn consolidate<'r, I>(records: I) -> ConsolidatedImportPlan
where
    I: IntoIterator<Item = &'r ImportRecord>,
{
    Consolidator::new().consolidate(records)
}

struct PlanBuilder {
    names: NameAllocator,
    suffix_max_length: usize,
    seen: FxHashSet<BindingKey>,
    plan: ConsolidatedImportPlan,
}

impl PlanBuilder {
    fn add_record(&mut self, record: &ImportRecord) {
        let module = record.module_path.as_str();
        for binding in record.runtime_bindings() {
            if is_blank(&binding.original_name) || binding.alias.as_deref().is_some_and(is_blank) {
                trace!(module, "dropped binding with an empty name");
                continue;
            }
            let key = BindingKey::new(module, binding);
            if !self.seen.insert(key.clone()) {
                continue;
            }
            let local = self.assign(module, binding);
            self.plan.names.insert(key, local);
        }

        if record.side_effect {
            self.module_plan(module).side_effect = true;
        }
    }

    fn module_plan(&mut self, module: &str) -> &mut ModulePlan {
        self.plan
            .modules
            .entry(module.to_string())
            .or_insert_with(|| ModulePlan::new(module))
    }

    fn assign(&mut self, module: &str, binding: &ImportBinding) -> String {
        let wanted = binding.local_name();
        let local = match binding.kind {
            BindingKind::Default => {
                self.names
                    .claim_with_module_suffix(wanted, module, self.suffix_max_length)
            }
            BindingKind::Namespace | BindingKind::Named => {
                if self.names.claim(wanted) {
                    wanted.to_string()
                } else {
                    self.names.claim_numbered(wanted)
                }
            }
        };
        if local != wanted {
            debug!(module, name = wanted, assigned = %local, kind = %binding.kind, "renamed colliding binding");
        }

        let entry = self.module_plan(module);
        match binding.kind {
            BindingKind::Default if entry.default_name.is_none() => {
                entry.default_name = Some(local.clone());
            }
            BindingKind::Default => entry.named.push(NamedImport {
                original: "default".to_string(),
                alias: local.clone(),
            }),
            BindingKind::Named => entry.named.push(NamedImport {
                original: binding.original_name.clone(),
                alias: local.clone(),
            }),
            BindingKind::Namespace => entry.namespaces.push(local.clone()),
        }
        local
    }

    fn finish(mut self) -> ConsolidatedImportPlan {
        for module in self.plan.modules.values_mut() {
            if module.has_bindings() {
                module.side_effect = false;
            }
        }
        self.plan
    }
}

fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}
