//! srcweave_path: Specifier and path utilities.
//!
//! All locators handled by the engine are `/`-separated strings. They may
//! name real files or entries of a virtual file system, so nothing in this
//! crate touches the disk.

/// Convert backslashes to forward slashes.
pub fn normalize_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

/// Normalize a path: unify separators, drop empty and `.` segments and fold
/// `..` against preceding segments.
///
/// Leading `..` segments of a relative path are kept, a leading `./` is kept
/// so relative specifiers stay relative, and `..` never climbs above the root
/// of an absolute path.
pub fn normalize_path(path: &str) -> String {
    let path = normalize_slashes(path);
    if path.is_empty() {
        return path;
    }
    let rooted = path.starts_with('/');
    let dot_prefixed = path.starts_with("./") || path == ".";

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else if dot_prefixed && !joined.starts_with("..") {
        format!("./{}", joined)
    } else {
        joined
    }
}

/// Combine two path segments.
pub fn combine_paths(base: &str, relative: &str) -> String {
    if is_rooted(relative) {
        return relative.to_string();
    }
    if base.is_empty() {
        return relative.to_string();
    }
    let base = ensure_trailing_directory_separator(base);
    format!("{}{}", base, relative)
}

/// Check if a path is rooted (absolute).
pub fn is_rooted(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    let bytes = path.as_bytes();
    // Unix absolute path
    if bytes[0] == b'/' {
        return true;
    }
    // Windows absolute path (e.g., C:\)
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}

/// Get the directory part of a path, without the trailing separator.
///
/// Returns `""` when the path has no directory part and `"/"` for entries of
/// the root directory.
pub fn get_directory_path(path: &str) -> &str {
    match path.rfind(is_directory_separator) {
        Some(0) => &path[..1],
        Some(last_slash) => &path[..last_slash],
        None => "",
    }
}

/// Get the base name (file name) from a path.
pub fn get_base_name(path: &str) -> &str {
    match path.rfind(is_directory_separator) {
        Some(last_slash) => &path[last_slash + 1..],
        None => path,
    }
}

/// Split a locator into its directory part and its base name.
pub fn split_directory(path: &str) -> (&str, &str) {
    (get_directory_path(path), get_base_name(path))
}

/// The extension of the file name, including the dot (`".tsx"`).
pub fn file_extension(path: &str) -> Option<&str> {
    let name = get_base_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(&name[dot..]),
    }
}

/// Whether the path ends with one of `extensions`, compared ASCII
/// case-insensitively.
pub fn has_extension(path: &str, extensions: &[String]) -> bool {
    file_extension(path)
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Remove the file extension from a path.
pub fn remove_extension(path: &str) -> &str {
    match file_extension(path) {
        Some(ext) => &path[..path.len() - ext.len()],
        None => path,
    }
}

/// Ensure a path ends with a directory separator.
pub fn ensure_trailing_directory_separator(path: &str) -> String {
    if path.ends_with('/') || path.ends_with('\\') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// Remove trailing directory separator.
pub fn remove_trailing_directory_separator(path: &str) -> &str {
    if path.len() > 1 && (path.ends_with('/') || path.ends_with('\\')) {
        &path[..path.len() - 1]
    } else {
        path
    }
}

/// Whether a module specifier is relative to the importing file: it starts
/// with a path-segment marker (`./`, `../`, `/`) or is `.` / `..` itself.
pub fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier.starts_with('/')
}

/// Whether a locator names a network resource (`https://`, `http://` or a
/// protocol-relative `//host`).
pub fn is_network_locator(locator: &str) -> bool {
    let lower = locator.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}

/// Prefix `./` to a specifier that lacks a relative marker.
pub fn ensure_relative_marker(specifier: &str) -> String {
    if is_relative_specifier(specifier) {
        specifier.to_string()
    } else {
        format!("./{}", specifier)
    }
}

/// Resolve a relative specifier against the file that imports it.
pub fn resolve_against(importer: &str, specifier: &str) -> String {
    let importer = normalize_slashes(importer);
    let directory = get_directory_path(&importer);
    normalize_path(&combine_paths(directory, specifier))
}

/// Relative specifier leading from directory `from_dir` to `to`, always with
/// a relative marker.
pub fn get_relative_path(from_dir: &str, to: &str) -> String {
    let from = normalize_path(from_dir);
    let to = normalize_path(to);
    let from_segments: Vec<&str> = from.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
    let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty() && *s != ".").collect();

    // Skip common prefix
    let common = from_segments
        .iter()
        .zip(&to_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from_segments.len() {
        parts.push("..");
    }
    parts.extend(&to_segments[common..]);

    let joined = parts.join("/");
    if joined.is_empty() {
        ".".to_string()
    } else {
        ensure_relative_marker(&joined)
    }
}

/// Split a bare module specifier into package name and subpath.
/// e.g. "@scope/pkg/sub/path" -> ("@scope/pkg", "sub/path")
/// e.g. "lodash/fp" -> ("lodash", "fp")
pub fn split_package_name(specifier: &str) -> (&str, &str) {
    let first = specifier.find('/');
    let split_at = if specifier.starts_with('@') {
        first.and_then(|slash| specifier[slash + 1..].find('/').map(|second| slash + 1 + second))
    } else {
        first
    };
    match split_at {
        Some(pos) => (&specifier[..pos], &specifier[pos + 1..]),
        None => (specifier, ""),
    }
}

/// Check if a character is a directory separator.
#[inline]
pub fn is_directory_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}
