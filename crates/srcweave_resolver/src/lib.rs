//! srcweave_resolver: Module path resolution.
//!
//! Turns extension-less specifiers into concrete files by probing directory
//! listings:
//! - `<specifier><ext>` for each extension, in priority order
//! - `<specifier>` itself, when it already names a file
//! - `<specifier>/<index><ext>`, when `<specifier>` is a directory
//!
//! Listings come from an injected [`DirectoryLister`]; the resolver never
//! touches the file system on its own.

mod lister;
mod resolver;

pub use lister::{DirEntry, DirectoryLister, FsDirectoryLister, MemoryDirectoryLister};
pub use resolver::{ModuleResolver, ResolveError, ResolvedModuleMap, DEFAULT_EXTENSIONS, DEFAULT_INDEX_FILE};
