//! srcweave_options: srcweave.json parsing and engine options.
//!
//! Every field is optional; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the configuration file looked up by [`find_options`].
pub const CONFIG_FILE_NAME: &str = "srcweave.json";

/// Engine options, matching the srcweave.json schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    // -- Resolution --
    /// Extensions probed by the resolver, in priority order.
    pub extensions: Vec<String>,
    /// File stem probed inside directories.
    pub index_file: String,

    // -- Import scanning --
    /// Files with these extensions use the style-sheet import grammar.
    pub style_extensions: Vec<String>,

    // -- Consolidation --
    pub suffix_max_length: usize,
    /// Names the consolidator must never assign.
    pub reserved_names: Vec<String>,
    pub provider_export_name: String,

    // -- Call sites --
    pub callees: Vec<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            extensions: strings(&[".ts", ".tsx", ".js", ".jsx"]),
            index_file: "index".to_string(),
            style_extensions: strings(&[".css", ".scss", ".sass", ".less", ".styl", ".pcss"]),
            suffix_max_length: 20,
            reserved_names: Vec::new(),
            provider_export_name: "modules".to_string(),
            callees: Vec::new(),
        }
    }
}

impl EngineOptions {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for extension in self.extensions.iter().chain(&self.style_extensions) {
            if !extension.starts_with('.') || extension.len() < 2 {
                return Err(OptionsError::InvalidExtension(extension.clone()));
            }
        }
        if self.index_file.is_empty() || self.index_file.contains('/') {
            return Err(OptionsError::InvalidValue {
                field: "indexFile",
                value: self.index_file.clone(),
            });
        }
        if !is_identifier(&self.provider_export_name) {
            return Err(OptionsError::InvalidValue {
                field: "providerExportName",
                value: self.provider_export_name.clone(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("extension '{0}' must start with '.'")]
    InvalidExtension(String),
    #[error("invalid value for '{field}': '{value}'")]
    InvalidValue { field: &'static str, value: String },
}

/// Parse srcweave.json content.
pub fn parse_options(content: &str) -> Result<EngineOptions, OptionsError> {
    let options: EngineOptions = serde_json::from_str(content)?;
    options.validate()?;
    Ok(options)
}

/// Parse a srcweave.json file from a path.
pub fn load_options(path: impl AsRef<Path>) -> Result<EngineOptions, OptionsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded options");
    parse_options(&content)
}

/// Load the nearest srcweave.json in `dir` or one of its ancestors. Returns
/// the defaults when there is none.
pub fn find_options(dir: impl AsRef<Path>) -> Result<EngineOptions, OptionsError> {
    for ancestor in dir.as_ref().ancestors() {
        let candidate = ancestor.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return load_options(candidate);
        }
    }
    debug!("no {} found, using defaults", CONFIG_FILE_NAME);
    Ok(EngineOptions::default())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_object_gives_defaults() {
        assert_eq!(parse_options("{}").unwrap(), EngineOptions::default());
    }

    #[test]
    fn test_partial_options() {
        let options = parse_options(
            r#"{
                "extensions": [".tsx", ".ts"],
                "reservedNames": ["React"],
                "providerExportName": "registry",
                "callees": ["defineArgs"]
            }"#,
        )
        .unwrap();
        assert_eq!(options.extensions, vec![".tsx", ".ts"]);
        assert_eq!(options.reserved_names, vec!["React"]);
        assert_eq!(options.provider_export_name, "registry");
        assert_eq!(options.callees, vec!["defineArgs"]);
        assert_eq!(options.index_file, "index");
        assert_eq!(options.suffix_max_length, 20);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_options("{ extensions: }"), Err(OptionsError::Parse(_))));
        assert!(matches!(
            parse_options(r#"{ "suffixMaxLength": "long" }"#),
            Err(OptionsError::Parse(_))
        ));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            parse_options(r#"{ "extensions": ["ts"] }"#),
            Err(OptionsError::InvalidExtension(ext)) if ext == "ts"
        ));
        assert!(matches!(
            parse_options(r#"{ "providerExportName": "my-modules" }"#),
            Err(OptionsError::InvalidValue { field: "providerExportName", .. })
        ));
        assert!(matches!(
            parse_options(r#"{ "indexFile": "" }"#),
            Err(OptionsError::InvalidValue { field: "indexFile", .. })
        ));
    }

    #[test]
    fn test_find_options_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{ "indexFile": "main" }"#).unwrap();
        let nested = dir.path().join("src").join("app");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_options(&nested).unwrap().index_file, "main");
    }

    #[test]
    fn test_find_options_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        // An ancestor of the temporary directory could carry its own file, so
        // only check that lookup succeeds.
        assert!(find_options(dir.path()).is_ok());
    }

    #[test]
    fn test_load_options_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_options(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, OptionsError::Io { .. }));
    }
}
