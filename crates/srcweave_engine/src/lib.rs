//! srcweave_engine: Analysis pipeline.
//!
//! Runs the engine over a set of source files: every file is scanned for
//! imports and call sites, every relative specifier is resolved in one
//! batch, and the imports of all files are consolidated in file order.

use rayon::prelude::*;
use srcweave_args::{CallSite, CallSiteCollector};
use srcweave_consolidate::{ConsolidatedImportPlan, Consolidator};
use srcweave_imports::{parse_imports, ImportRecord, ParsedImports};
use srcweave_options::{find_options, load_options, EngineOptions, OptionsError};
use srcweave_resolver::{DirectoryLister, ModuleResolver, ResolveError, ResolvedModuleMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Options(#[from] OptionsError),
}

/// The analysis of one source file.
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub file_name: String,
    pub imports: ParsedImports,
    pub call_sites: Vec<CallSite>,
}

/// Everything one [`Project::run`] produced.
#[derive(Debug, Clone)]
pub struct ProjectOutput {
    /// Per-file results, in the order files were added. Relative records
    /// carry their resolved path when resolution succeeded.
    pub files: Vec<FileAnalysis>,
    pub resolution: ResolvedModuleMap,
    /// Consolidated imports of all files. Relative modules are keyed by
    /// their resolved path, or by their absolute specifier when unresolved.
    pub plan: ConsolidatedImportPlan,
    pub provider: String,
}

impl ProjectOutput {
    pub fn unresolved(&self) -> &[ResolveError] {
        &self.resolution.unresolved
    }
}

/// A set of source files analyzed together.
pub struct Project {
    /// Engine options.
    pub options: EngineOptions,
    /// The root file names.
    pub root_files: Vec<String>,
    /// Source files as (file name, text).
    source_files: Vec<(String, String)>,
}

impl Project {
    /// Create a new project from root files and options.
    pub fn new(root_files: Vec<String>, options: EngineOptions) -> Self {
        Self {
            options,
            root_files,
            source_files: Vec::new(),
        }
    }

    /// Create a project whose options come from `config`, or from the
    /// nearest srcweave.json above `search_dir` when no file is given.
    pub fn configured(
        root_files: Vec<String>,
        config: Option<&Path>,
        search_dir: &Path,
    ) -> Result<Self, EngineError> {
        let options = match config {
            Some(path) => load_options(path)?,
            None => find_options(search_dir)?,
        };
        Ok(Self::new(root_files, options))
    }

    /// Add a source file to the project.
    pub fn add_source(&mut self, file_name: impl Into<String>, source_text: impl Into<String>) {
        self.source_files.push((file_name.into(), source_text.into()));
    }

    /// Load all root files from disk.
    pub fn load_root_files(&mut self) -> Result<(), EngineError> {
        for file in &self.root_files {
            let content = std::fs::read_to_string(file).map_err(|source| EngineError::Io {
                path: PathBuf::from(file),
                source,
            })?;
            self.source_files.push((file.clone(), content));
        }
        Ok(())
    }

    pub fn source_count(&self) -> usize {
        self.source_files.len()
    }

    /// Scan every file for imports and call sites. Files are independent,
    /// so they are scanned in parallel; results keep the file order.
    pub fn analyze(&self) -> Vec<FileAnalysis> {
        let collector = self
            .options
            .callees
            .iter()
            .fold(CallSiteCollector::new(), |collector, callee| collector.with_callee(callee.as_str()));
        let style_extensions = &self.options.style_extensions;

        self.source_files
            .par_iter()
            .map(|(file_name, text)| FileAnalysis {
                file_name: file_name.clone(),
                imports: parse_imports(text, file_name, style_extensions),
                call_sites: collector.collect(text),
            })
            .collect()
    }

    /// Analyze, resolve and consolidate. Unresolved relative specifiers are
    /// reported in the output and logged, never fatal.
    pub fn run<L: DirectoryLister>(&self, lister: L) -> ProjectOutput {
        let mut files = self.analyze();

        let specifiers: Vec<String> = files
            .iter()
            .flat_map(|file| file.imports.relative())
            .filter_map(|record| record.absolute_specifier.clone())
            .collect();
        let resolver = ModuleResolver::new(lister)
            .with_extensions(self.options.extensions.iter().cloned())
            .with_index_file(self.options.index_file.as_str());
        let resolution = resolver.resolve_many(&specifiers);
        for err in &resolution.unresolved {
            warn!(specifier = err.specifier(), "unresolved module");
        }

        for file in &mut files {
            for record in file.imports.records_mut() {
                let resolved = record
                    .absolute_specifier
                    .as_deref()
                    .and_then(|specifier| resolution.get(specifier))
                    .map(str::to_string);
                if let Some(path) = resolved {
                    record.attach_resolution(path);
                }
            }
        }

        let keyed: Vec<ImportRecord> = files
            .iter()
            .flat_map(|file| file.imports.records())
            .map(keyed_by_location)
            .collect();
        let plan = Consolidator::new()
            .with_reserved(self.options.reserved_names.iter().cloned())
            .with_suffix_max_length(self.options.suffix_max_length)
            .consolidate(&keyed);
        let provider = plan.render_provider(&self.options.provider_export_name);
        debug!(
            files = files.len(),
            resolved = resolution.len(),
            unresolved = resolution.unresolved.len(),
            modules = plan.len(),
            "project analyzed"
        );

        ProjectOutput {
            files,
            resolution,
            plan,
            provider,
        }
    }
}

/// A copy of `record` whose module path names the module the same way for
/// every importer.
fn keyed_by_location(record: &ImportRecord) -> ImportRecord {
    let mut keyed = record.clone();
    if let Some(location) = record.resolved_path.as_ref().or(record.absolute_specifier.as_ref()) {
        keyed.module_path = location.clone();
    }
    keyed
}
