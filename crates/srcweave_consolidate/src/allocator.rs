//! Collision-free local names.

use rustc_hash::FxHashSet;
use srcweave_path::{
    get_base_name, is_network_locator, is_relative_specifier, is_rooted, remove_extension,
    remove_trailing_directory_separator, split_package_name,
};

/// Longest module-derived suffix handed out by default.
pub const DEFAULT_SUFFIX_MAX_LENGTH: usize = 20;

/// The set of local names already handed out.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    used: FxHashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator that never hands out any of `reserved`.
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            used: reserved.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Take `name` if it is free.
    pub fn claim(&mut self, name: &str) -> bool {
        if self.used.contains(name) {
            return false;
        }
        self.used.insert(name.to_string());
        true
    }

    /// Take the first free name of `base1`, `base2`, ...
    pub fn claim_numbered(&mut self, base: &str) -> String {
        let mut counter = 1usize;
        loop {
            let candidate = format!("{}{}", base, counter);
            if self.claim(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Take `name` if free, else `name_<suffix>` derived from `module`,
    /// else a numbered name.
    pub fn claim_with_module_suffix(&mut self, name: &str, module: &str, max_len: usize) -> String {
        if self.claim(name) {
            return name.to_string();
        }
        if let Some(suffix) = module_suffix(module, max_len) {
            let candidate = format!("{}_{}", name, suffix);
            if self.claim(&candidate) {
                return candidate;
            }
        }
        self.claim_numbered(name)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// The module-derived collision suffix: the package name (or, for paths,
/// the file stem) with everything but ASCII letters and digits removed,
/// lower-cased and capped at `max_len` characters.
///
/// Modules named like `lib1`, `lib2` get no suffix, so collisions between
/// them are numbered.
pub fn module_suffix(module: &str, max_len: usize) -> Option<String> {
    let module = remove_trailing_directory_separator(module);
    let name = if is_relative_specifier(module) || is_rooted(module) || is_network_locator(module) {
        remove_extension(get_base_name(module))
    } else {
        split_package_name(module).0
    };
    if is_numbered_library(name) {
        return None;
    }

    let suffix: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(max_len)
        .collect();
    (!suffix.is_empty()).then_some(suffix)
}

fn is_numbered_library(name: &str) -> bool {
    name.strip_prefix("lib")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
