//! Module manifest (`include.json`) loading.
//!
//! A manifest is a JSON object mapping creation-method names to lists of
//! paths relative to the module's source directory:
//!
//! ```json
//! {
//!   "mkdir": ["bin"],
//!   "copy": ["bin/run.sh"],
//!   "symlink": ["config.json"]
//! }
//! ```
//!
//! Method names are matched case-insensitively. Entries are returned in file
//! order; sorting by creation priority is the caller's job.
use serde_json::Value;
use std::path::Path;

use crate::error::ConfigError;
use crate::modules::CreationMethod;

/// File name of a module manifest inside the module's source directory.
pub const MANIFEST_FILE: &str = "include.json";

/// One `(method, path)` pair listed in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// How the path is deployed.
    pub method: CreationMethod,
    /// Path relative to the module's source directory, as written.
    pub path: String,
}

/// Parsed manifest contents.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Entries in file order.
    pub entries: Vec<ManifestEntry>,
}

/// Load and validate the manifest at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::ManifestIo`] if the file cannot be read,
/// [`ConfigError::MalformedManifest`] if it is not an object of string lists,
/// and [`ConfigError::UnknownCreationMethod`] for an unrecognised key.
pub fn load(path: &Path) -> Result<Manifest, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ManifestIo {
        path: path.to_path_buf(),
        source,
    })?;
    parse_from_str(&content, path)
}

/// Parse manifest `content`; `path` is only used in error messages.
///
/// # Errors
///
/// See [`load`].
pub fn parse_from_str(content: &str, path: &Path) -> Result<Manifest, ConfigError> {
    let malformed = |message: String| ConfigError::MalformedManifest {
        path: path.to_path_buf(),
        message,
    };

    let value: Value = serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(groups) = value else {
        return Err(malformed(
            "expected an object mapping creation methods to lists of paths".to_string(),
        ));
    };

    let mut entries = Vec::new();
    for (key, paths) in groups {
        let method: CreationMethod = key.parse()?;
        let paths: Vec<String> = serde_json::from_value(paths)
            .map_err(|_| malformed(format!("expected a list of strings for key '{key}'")))?;
        entries.extend(
            paths
                .into_iter()
                .map(|path| ManifestEntry { method, path }),
        );
    }
    Ok(Manifest { entries })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Manifest, ConfigError> {
        parse_from_str(content, Path::new("include.json"))
    }

    #[test]
    fn parses_all_methods_in_file_order() {
        let manifest =
            parse(r#"{"symlink": ["config.json"], "mkdir": ["bin"], "copy": ["bin/run.sh"]}"#)
                .unwrap();
        let methods: Vec<CreationMethod> = manifest.entries.iter().map(|e| e.method).collect();
        assert_eq!(
            methods,
            vec![
                CreationMethod::Symlink,
                CreationMethod::MakeDirectory,
                CreationMethod::Copy
            ]
        );
        assert_eq!(manifest.entries[0].path, "config.json");
    }

    #[test]
    fn method_keys_are_case_insensitive() {
        let manifest = parse(r#"{"MKDIR": ["a"], "Copy": ["b"], "SymLink": ["c"]}"#).unwrap();
        assert_eq!(manifest.entries[0].method, CreationMethod::MakeDirectory);
        assert_eq!(manifest.entries[1].method, CreationMethod::Copy);
        assert_eq!(manifest.entries[2].method, CreationMethod::Symlink);
    }

    #[test]
    fn keeps_order_within_a_group() {
        let manifest = parse(r#"{"copy": ["z", "a", "m"]}"#).unwrap();
        let paths: Vec<&str> = manifest.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["z", "a", "m"]);
    }

    #[test]
    fn empty_object_yields_no_entries() {
        assert!(parse("{}").unwrap().entries.is_empty());
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = parse(r#"{"hardlink": ["a"]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCreationMethod(ref k) if k == "hardlink"));
    }

    #[test]
    fn non_object_is_malformed() {
        let err = parse(r#"["bin"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedManifest { .. }));
    }

    #[test]
    fn non_string_list_is_malformed() {
        let err = parse(r#"{"copy": "bin/run.sh"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed manifest include.json: expected a list of strings for key 'copy'"
        );
        let err = parse(r#"{"copy": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedManifest { .. }));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse(r#"{"copy": ["a""#).unwrap_err();
        assert!(err.to_string().contains("malformed manifest include.json"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join(MANIFEST_FILE)).unwrap_err();
        assert!(matches!(err, ConfigError::ManifestIo { .. }));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, r#"{"mkdir": ["bin"]}"#).unwrap();
        let manifest = load(&path).unwrap();
        assert_eq!(
            manifest.entries,
            vec![ManifestEntry {
                method: CreationMethod::MakeDirectory,
                path: "bin".to_string(),
            }]
        );
    }
}
