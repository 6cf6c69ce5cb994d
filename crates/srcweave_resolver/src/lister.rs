//! Directory listers.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use srcweave_path::{get_base_name, get_directory_path, normalize_path, remove_trailing_directory_separator};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_file: bool,
    pub is_directory: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: true,
            is_directory: false,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: false,
            is_directory: true,
        }
    }
}

/// Source of directory listings for the resolver.
pub trait DirectoryLister {
    /// List the entries of `directory`. `""` names the current directory.
    fn list(&self, directory: &str) -> io::Result<Vec<DirEntry>>;
}

impl<T: DirectoryLister + ?Sized> DirectoryLister for &T {
    fn list(&self, directory: &str) -> io::Result<Vec<DirEntry>> {
        (**self).list(directory)
    }
}

impl<T: DirectoryLister + ?Sized> DirectoryLister for Box<T> {
    fn list(&self, directory: &str) -> io::Result<Vec<DirEntry>> {
        (**self).list(directory)
    }
}

/// Lists directories of the real file system. Symbolic links are reported
/// as what they point to; entries whose names are not UTF-8 are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectoryLister;

impl DirectoryLister for FsDirectoryLister {
    fn list(&self, directory: &str) -> io::Result<Vec<DirEntry>> {
        let directory = if directory.is_empty() { "." } else { directory };
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let mut file_type = entry.file_type()?;
            if file_type.is_symlink() {
                match std::fs::metadata(entry.path()) {
                    Ok(metadata) => file_type = metadata.file_type(),
                    // Dangling link.
                    Err(_) => continue,
                }
            }
            entries.push(DirEntry {
                name,
                is_file: file_type.is_file(),
                is_directory: file_type.is_dir(),
            });
        }
        Ok(entries)
    }
}

/// A virtual directory tree built from file paths.
///
/// Every ancestor directory of an added file exists implicitly. The lister
/// counts the listings it served, which lets callers check how often a
/// directory was read.
#[derive(Debug, Default)]
pub struct MemoryDirectoryLister {
    directories: FxHashMap<String, IndexMap<String, DirEntry>>,
    listings: AtomicUsize,
}

impl MemoryDirectoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lister = Self::new();
        for file in files {
            lister.add_file(file.as_ref());
        }
        lister
    }

    /// Add a file, creating its ancestor directories.
    pub fn add_file(&mut self, path: &str) {
        let path = normalize_path(path);
        let name = get_base_name(&path);
        if name.is_empty() || name == "." {
            return;
        }
        self.insert(get_directory_path(&path), DirEntry::file(name));

        let mut directory = get_directory_path(&path).to_string();
        while !directory.is_empty() && directory != "/" && directory != "." {
            let name = get_base_name(&directory).to_string();
            let parent = get_directory_path(&directory).to_string();
            self.insert(&parent, DirEntry::directory(name));
            directory = parent;
        }
    }

    fn insert(&mut self, directory: &str, entry: DirEntry) {
        let entries = self
            .directories
            .entry(directory_key(directory).to_string())
            .or_default();
        match entries.get_mut(&entry.name) {
            Some(existing) => {
                existing.is_file |= entry.is_file;
                existing.is_directory |= entry.is_directory;
            }
            None => {
                entries.insert(entry.name.clone(), entry);
            }
        }
    }

    /// Number of listings served so far.
    pub fn listings(&self) -> usize {
        self.listings.load(Ordering::Relaxed)
    }
}

impl DirectoryLister for MemoryDirectoryLister {
    fn list(&self, directory: &str) -> io::Result<Vec<DirEntry>> {
        self.listings.fetch_add(1, Ordering::Relaxed);
        let normalized = normalize_path(directory);
        self.directories
            .get(directory_key(&normalized))
            .map(|entries| entries.values().cloned().collect())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", directory),
                )
            })
    }
}

/// Map spellings of the same directory onto one key.
fn directory_key(directory: &str) -> &str {
    let directory = remove_trailing_directory_separator(directory);
    match directory.strip_prefix("./") {
        Some(rest) => rest,
        None if directory == "." => "",
        None => directory,
    }
}
