//! srcweave_consolidate: Import consolidation.
//!
//! Merges the import records of many files into one plan: type-only and
//! empty bindings are dropped, identical bindings collapse, and every
//! surviving binding gets a local name that is unique across the plan. The
//! plan renders as a minimal list of import statements, or as provider text
//! exporting a table from module path to the bound values.

mod allocator;
mod plan;
mod render;

pub use allocator::{module_suffix, NameAllocator, DEFAULT_SUFFIX_MAX_LENGTH};
pub use plan::{consolidate, ConsolidatedImportPlan, Consolidator, ModulePlan, NamedImport};
