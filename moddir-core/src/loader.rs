//! Directory loader
//!
//! Walks exactly one level of a resolved module directory, loads every
//! eligible file through a [`ModuleSource`], and assembles the results into a
//! flat name-to-instance [`Registry`]. Subdirectories are neither descended
//! into nor loaded themselves.
//!
//! Eligibility is a case-insensitive suffix check: the file name must end in
//! the configured suffix and be strictly longer than it, so a file named
//! exactly `.json` is rejected.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::LoaderConfig;
use crate::error::{LoaderError, Result};
use crate::resolver::resolve_module_path;
use crate::source::{instantiate, ModuleInstance, ModuleSource};

/// The final name-to-instance mapping returned by a load call.
///
/// Built fresh per call, never merged with a previous registry. Each name
/// maps to exactly one instance; on collision the file processed later wins
/// (enumeration order is filesystem-dependent).
pub type Registry<T> = HashMap<String, T>;

/// Directory loader for building a registry from one directory of modules
///
/// # Example
///
/// ```rust
/// use moddir_core::{DirLoader, JsonSource};
/// use serde_json::json;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("auth.json"), r#"{"max_sessions": 8}"#).unwrap();
///
/// let loader = DirLoader::new(JsonSource::new());
/// let registry = loader.load(dir.path().to_str().unwrap(), &json!({})).unwrap();
///
/// assert_eq!(registry["auth"], json!({"max_sessions": 8}));
/// ```
#[derive(Debug)]
pub struct DirLoader<S> {
    /// The file-loading collaborator
    source: S,

    /// Eligible-file suffix, always `.`-prefixed
    suffix: String,

    /// Whether to log name collisions (later file wins either way)
    collision_warnings: bool,
}

impl<S: ModuleSource> DirLoader<S> {
    /// Create a loader using the source's own eligible-file suffix
    pub fn new(source: S) -> Self {
        let suffix = normalize_suffix(source.suffix());
        Self {
            source,
            suffix,
            collision_warnings: true,
        }
    }

    /// Create a loader from a [`LoaderConfig`]
    pub fn with_config(source: S, config: LoaderConfig) -> Self {
        let mut loader = Self::new(source);
        if let Some(suffix) = config.suffix {
            loader.suffix = normalize_suffix(&suffix);
        }
        loader.collision_warnings = config.collision_warnings;
        loader
    }

    /// Override the eligible-file suffix; a leading `.` is added when missing
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = normalize_suffix(suffix);
        self
    }

    /// Load all eligible modules directly under `path` into a fresh registry.
    ///
    /// `path` may be relative or absolute and must resolve to an existing
    /// directory. `context` is forwarded by reference, unmodified, to every
    /// factory the source produces; the loader neither mutates nor retains
    /// it past this call.
    ///
    /// Any error loading an individual file, or raised by a factory, aborts
    /// the whole call; no partial registry is returned. An empty directory is
    /// a soft signal: a warning is logged and an empty registry is returned.
    pub fn load(&self, path: &str, context: &S::Context) -> Result<Registry<S::Instance>> {
        let dir = resolve_module_path(path)?;
        self.load_dir(&dir, context)
    }

    fn load_dir(&self, dir: &Path, context: &S::Context) -> Result<Registry<S::Instance>> {
        let dir_read_err = |e: std::io::Error| LoaderError::DirRead {
            path: dir.display().to_string(),
            reason: e.to_string(),
        };

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(dir_read_err)? {
            entries.push(entry.map_err(dir_read_err)?);
        }

        if entries.is_empty() {
            tracing::warn!(path = %dir.display(), "module directory is empty");
            return Ok(Registry::new());
        }

        let mut registry = Registry::new();

        for entry in entries {
            let file_name_os = entry.file_name();
            // Path::join guarantees exactly one separator between the two.
            let file_path = dir.join(&file_name_os);

            // A non-UTF-8 name cannot end in a UTF-8 suffix.
            let Some(file_name) = file_name_os.to_str() else {
                continue;
            };

            // metadata() follows symlinks, so a symlink to a regular file is
            // eligible; anything else (including a broken link) is skipped.
            let is_file = fs::metadata(&file_path).map(|m| m.is_file()).unwrap_or(false);
            if !is_file || !has_suffix(file_name, &self.suffix) {
                tracing::trace!(file = %file_name, "skipping ineligible entry");
                continue;
            }

            let Some(export) = self.source.load_export(&file_path)? else {
                tracing::trace!(file = %file_name, "module loaded to nothing; skipping");
                continue;
            };

            let instance = instantiate(export, context)?;

            let name = match instance.name() {
                Some(n) if !n.is_empty() => n.to_string(),
                _ => strip_suffix(file_name, &self.suffix).to_string(),
            };

            if registry.insert(name.clone(), instance).is_some() && self.collision_warnings {
                tracing::warn!(
                    name = %name,
                    file = %file_name,
                    "registry name collision; keeping the later module"
                );
            }
        }

        Ok(registry)
    }
}

/// Guarantee a `.`-prefixed suffix token
fn normalize_suffix(suffix: &str) -> String {
    if suffix.starts_with('.') {
        suffix.to_string()
    } else {
        format!(".{}", suffix)
    }
}

/// Case-insensitive suffix check; the file name must be strictly longer than
/// the suffix, so a bare `.json` never matches.
fn has_suffix(file_name: &str, suffix: &str) -> bool {
    if file_name.len() <= suffix.len() {
        return false;
    }
    file_name
        .get(file_name.len() - suffix.len()..)
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

/// Strip the suffix from a file name; names not longer than the suffix are
/// returned unmodified.
fn strip_suffix<'a>(file_name: &'a str, suffix: &str) -> &'a str {
    if file_name.len() > suffix.len() {
        file_name
            .get(..file_name.len() - suffix.len())
            .unwrap_or(file_name)
    } else {
        file_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_match_is_case_insensitive() {
        assert!(has_suffix("auth.json", ".json"));
        assert!(has_suffix("auth.JSON", ".json"));
        assert!(has_suffix("auth.Json", ".JSON"));
        assert!(!has_suffix("auth.jsonx", ".json"));
        assert!(!has_suffix("authjson", ".json"));
    }

    #[test]
    fn test_bare_suffix_is_rejected() {
        assert!(!has_suffix(".json", ".json"));
        assert!(!has_suffix(".JSON", ".json"));
        assert!(!has_suffix("", ".json"));
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_suffix("auth.json", ".json"), "auth");
        assert_eq!(strip_suffix("a.b.json", ".json"), "a.b");
        // Not longer than the suffix: unmodified.
        assert_eq!(strip_suffix(".json", ".json"), ".json");
        assert_eq!(strip_suffix("x", ".json"), "x");
    }

    #[test]
    fn test_normalize_suffix_adds_leading_dot() {
        assert_eq!(normalize_suffix("json"), ".json");
        assert_eq!(normalize_suffix(".json"), ".json");
        assert_eq!(normalize_suffix(".module.json"), ".module.json");
    }
}
