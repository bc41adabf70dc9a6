//! Module path resolution
//!
//! Turns the caller's raw path string into a canonical absolute directory
//! path, failing fast on anything that is not an existing directory. This is
//! the only place the loader validates its path argument; everything after it
//! works with the canonical form.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoaderError, Result};

/// Resolve a raw path string to a canonical absolute directory path.
///
/// - An empty string fails with [`LoaderError::EmptyPath`] before any
///   filesystem call.
/// - Canonicalization resolves symlinks and relative segments; a path that
///   does not exist or is inaccessible fails with
///   [`LoaderError::PathResolution`].
/// - A canonical path that is not a directory fails with
///   [`LoaderError::NotADirectory`].
pub fn resolve_module_path(raw: &str) -> Result<PathBuf> {
    if raw.is_empty() {
        return Err(LoaderError::EmptyPath);
    }

    let canonical = fs::canonicalize(raw).map_err(|e| LoaderError::PathResolution {
        path: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !is_dir(&canonical)? {
        return Err(LoaderError::NotADirectory {
            path: canonical.display().to_string(),
        });
    }

    Ok(canonical)
}

fn is_dir(path: &Path) -> Result<bool> {
    let meta = fs::metadata(path).map_err(|e| LoaderError::PathResolution {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(meta.is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_rejected_before_fs() {
        let err = resolve_module_path("").unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_PATH");
    }

    #[test]
    fn test_missing_path_fails_resolution() {
        let err = resolve_module_path("/definitely/not/a/real/path").unwrap_err();
        assert_eq!(err.error_code(), "PATH_RESOLUTION_ERROR");
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = resolve_module_path(file.to_str().unwrap()).unwrap_err();
        assert_eq!(err.error_code(), "NOT_A_DIRECTORY");
    }

    #[test]
    fn test_relative_segments_are_canonicalized() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a");
        fs::create_dir(&nested).unwrap();

        let raw = format!("{}/a/..", dir.path().display());
        let resolved = resolve_module_path(&raw).unwrap();
        assert_eq!(resolved, dir.path().canonicalize().unwrap());
        assert!(resolved.is_absolute());
    }
}
