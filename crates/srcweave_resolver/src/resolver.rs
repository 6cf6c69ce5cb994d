//! Extension and directory-index probing.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use srcweave_path::{
    combine_paths, normalize_path, remove_trailing_directory_separator, split_directory,
};
use thiserror::Error;
use tracing::{debug, trace};

use crate::lister::{DirEntry, DirectoryLister};

/// Probe order used when no extensions are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

/// File stem probed inside directories.
pub const DEFAULT_INDEX_FILE: &str = "index";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No candidate exists. `candidates` lists every locator probed, in
    /// probe order.
    #[error("cannot resolve module '{specifier}' (tried {})", candidates.join(", "))]
    NotFound {
        specifier: String,
        candidates: Vec<String>,
    },
}

impl ResolveError {
    pub fn specifier(&self) -> &str {
        match self {
            ResolveError::NotFound { specifier, .. } => specifier,
        }
    }
}

/// Outcome of [`ModuleResolver::resolve_many`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedModuleMap {
    /// Specifier to concrete file, in input order.
    pub resolved: IndexMap<String, String>,
    pub unresolved: Vec<ResolveError>,
}

impl ResolvedModuleMap {
    pub fn get(&self, specifier: &str) -> Option<&str> {
        self.resolved.get(specifier).map(String::as_str)
    }

    pub fn is_resolved(&self, specifier: &str) -> bool {
        self.resolved.contains_key(specifier)
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Resolves specifiers against directory listings.
#[derive(Debug, Clone)]
pub struct ModuleResolver<L> {
    lister: L,
    extensions: Vec<String>,
    index_file: String,
}

impl<L: DirectoryLister> ModuleResolver<L> {
    pub fn new(lister: L) -> Self {
        Self {
            lister,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }

    /// Replace the probe order. Extensions include their leading dot.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_index_file(mut self, index_file: impl Into<String>) -> Self {
        self.index_file = index_file.into();
        self
    }

    pub fn lister(&self) -> &L {
        &self.lister
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn index_file(&self) -> &str {
        &self.index_file
    }

    /// Resolve one specifier to a concrete file.
    pub fn resolve(&self, specifier: &str) -> Result<String, ResolveError> {
        let mut listings = Listings::new(&self.lister);
        self.resolve_with(specifier, &mut listings)
    }

    /// Resolve many specifiers, reading each directory at most once.
    ///
    /// Parent directories are listed up front, one listing per distinct
    /// parent. A directory that needs an index probe costs one more listing.
    /// Repeated specifiers are resolved once.
    pub fn resolve_many<S: AsRef<str>>(&self, specifiers: &[S]) -> ResolvedModuleMap {
        let mut listings = Listings::new(&self.lister);

        let parents: IndexSet<String> = specifiers
            .iter()
            .map(|s| listing_key(split_directory(remove_trailing_directory_separator(s.as_ref())).0))
            .collect();
        debug!(specifiers = specifiers.len(), directories = parents.len(), "batched resolution");
        for parent in &parents {
            listings.entries(parent);
        }

        let mut map = ResolvedModuleMap::default();
        let mut seen = FxHashSet::default();
        for specifier in specifiers {
            let specifier = specifier.as_ref();
            if !seen.insert(specifier) {
                continue;
            }
            match self.resolve_with(specifier, &mut listings) {
                Ok(path) => {
                    map.resolved.insert(specifier.to_string(), path);
                }
                Err(err) => map.unresolved.push(err),
            }
        }
        map
    }

    fn resolve_with(&self, specifier: &str, listings: &mut Listings<'_, L>) -> Result<String, ResolveError> {
        let trimmed = remove_trailing_directory_separator(specifier);
        let (directory, base) = split_directory(trimmed);
        let mut candidates = Vec::new();

        // `.`, `..` and a trailing separator name a directory outright.
        let names_directory =
            specifier.ends_with('/') || base.is_empty() || base == "." || base == "..";

        let directory_to_index = if names_directory {
            Some(trimmed.to_string())
        } else {
            let names: Vec<String> = self.extensions.iter().map(|ext| format!("{}{}", base, ext)).collect();
            candidates.extend(names.iter().map(|name| join(directory, name)));
            candidates.push(trimmed.to_string());

            let entries = listings.entries(directory).unwrap_or_default();
            // Extension probe, then the name as written.
            if let Some(name) = names
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(base))
                .find(|name| has_file(entries, name))
            {
                let path = join(directory, name);
                trace!(specifier, path = %path, "resolved to file");
                return Ok(path);
            }
            entries
                .iter()
                .any(|e| e.is_directory && e.name == base)
                .then(|| trimmed.to_string())
        };

        if let Some(index_directory) = directory_to_index {
            let names: Vec<String> = self
                .extensions
                .iter()
                .map(|ext| format!("{}{}", self.index_file, ext))
                .collect();
            candidates.extend(names.iter().map(|name| join(&index_directory, name)));

            let entries = listings.entries(&index_directory).unwrap_or_default();
            if let Some(name) = names.iter().find(|name| has_file(entries, name)) {
                let path = join(&index_directory, name);
                trace!(specifier, path = %path, "resolved to directory index");
                return Ok(path);
            }
        }

        debug!(specifier, candidates = candidates.len(), "module not found");
        Err(ResolveError::NotFound {
            specifier: specifier.to_string(),
            candidates,
        })
    }
}

/// Listings fetched during one resolution pass, keyed by [`listing_key`].
struct Listings<'l, L> {
    lister: &'l L,
    cache: FxHashMap<String, Option<Vec<DirEntry>>>,
}

impl<'l, L: DirectoryLister> Listings<'l, L> {
    fn new(lister: &'l L) -> Self {
        Self {
            lister,
            cache: FxHashMap::default(),
        }
    }

    /// Entries of `directory`, listing it on first use. A directory that
    /// cannot be listed has no entries.
    fn entries(&mut self, directory: &str) -> Option<&[DirEntry]> {
        let key = listing_key(directory);
        if !self.cache.contains_key(&key) {
            let listing = match self.lister.list(directory) {
                Ok(entries) => {
                    debug!(directory, entries = entries.len(), "listed directory");
                    Some(entries)
                }
                Err(err) => {
                    debug!(directory, error = %err, "directory listing failed");
                    None
                }
            };
            self.cache.insert(key.clone(), listing);
        }
        self.cache.get(&key).and_then(|listing| listing.as_deref())
    }
}

/// One spelling per directory: `""`, `"."` and `"./"` are the current
/// directory, and `"./x"` is `"x"`.
fn listing_key(directory: &str) -> String {
    let normalized = normalize_path(directory);
    match normalized.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None if normalized == "." => String::new(),
        None => normalized,
    }
}

fn has_file(entries: &[DirEntry], name: &str) -> bool {
    entries.iter().any(|e| e.is_file && e.name == name)
}

fn join(directory: &str, name: &str) -> String {
    if directory.is_empty() {
        name.to_string()
    } else {
        combine_paths(directory, name)
    }
}
