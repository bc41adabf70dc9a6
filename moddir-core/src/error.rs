//! Error types for loader operations
//!
//! Every fatal condition the loader can hit has its own variant with:
//! - A human-readable message naming the offending path where one exists
//! - A stable error code for programmatic handling
//! - A category for grouping and filtering
//! - JSON serialization for host integrations
//!
//! An empty target directory is deliberately *not* represented here; it is a
//! soft signal (a warning plus an empty registry), not an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Path does not exist or could not be resolved
    NotFound,
    /// Input validation failed
    Validation,
    /// Filesystem read or module load/factory failure
    External,
}

/// Errors that can occur while building a registry
///
/// All fatal conditions abort the entire `load` call; there is no partial
/// registry and no retry inside the loader.
#[derive(Error, Debug)]
pub enum LoaderError {
    // ═══════════════════════════════════════════════════════════════════════
    // Path resolution errors
    // ═══════════════════════════════════════════════════════════════════════

    /// The path argument was empty
    #[error("Module path must not be empty.")]
    EmptyPath,

    /// The path could not be canonicalized to an existing location
    #[error("Failed to resolve module path '{path}': {reason}")]
    PathResolution { path: String, reason: String },

    /// The resolved path exists but is not a directory
    #[error("Module path is not a directory: '{path}'")]
    NotADirectory { path: String },

    // ═══════════════════════════════════════════════════════════════════════
    // Directory and module loading errors
    // ═══════════════════════════════════════════════════════════════════════

    /// Enumerating or stat-ing the target directory failed
    #[error("Failed to read directory '{path}': {reason}")]
    DirRead { path: String, reason: String },

    /// A module source failed to load one file
    #[error("Failed to load module from '{path}': {reason}")]
    ModuleLoad { path: String, reason: String },

    /// A module factory returned an error
    #[error("Module factory failed: {reason}")]
    FactoryFailed { reason: String },
}

impl LoaderError {
    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            LoaderError::EmptyPath | LoaderError::NotADirectory { .. } => {
                ErrorCategory::Validation
            }

            LoaderError::PathResolution { .. } => ErrorCategory::NotFound,

            LoaderError::DirRead { .. }
            | LoaderError::ModuleLoad { .. }
            | LoaderError::FactoryFailed { .. } => ErrorCategory::External,
        }
    }

    /// Returns the stable error code for this error
    ///
    /// Error codes are uppercase, underscore-separated identifiers that
    /// remain stable across versions; switch on these rather than on
    /// message text.
    pub fn error_code(&self) -> &'static str {
        match self {
            LoaderError::EmptyPath => "EMPTY_PATH",
            LoaderError::PathResolution { .. } => "PATH_RESOLUTION_ERROR",
            LoaderError::NotADirectory { .. } => "NOT_A_DIRECTORY",
            LoaderError::DirRead { .. } => "DIRECTORY_READ_ERROR",
            LoaderError::ModuleLoad { .. } => "MODULE_LOAD_ERROR",
            LoaderError::FactoryFailed { .. } => "FACTORY_FAILED",
        }
    }

    /// Converts this error to a JSON-serializable response object
    ///
    /// ```json
    /// {
    ///   "error": {
    ///     "code": "NOT_A_DIRECTORY",
    ///     "message": "Module path is not a directory: '/etc/hosts'",
    ///     "category": "validation"
    ///   }
    /// }
    /// ```
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                category: self.category(),
            },
        }
    }
}

/// JSON-serializable error response for host integrations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
}

/// Error detail for JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code (e.g., "NOT_A_DIRECTORY")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Error category
    pub category: ErrorCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LoaderError::EmptyPath.error_code(), "EMPTY_PATH");
        assert_eq!(
            LoaderError::NotADirectory {
                path: "/tmp/file".to_string()
            }
            .error_code(),
            "NOT_A_DIRECTORY"
        );
        assert_eq!(
            LoaderError::ModuleLoad {
                path: "/tmp/mods/a.json".to_string(),
                reason: "bad".to_string()
            }
            .error_code(),
            "MODULE_LOAD_ERROR"
        );
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(LoaderError::EmptyPath.category(), ErrorCategory::Validation);
        assert_eq!(
            LoaderError::PathResolution {
                path: "/missing".to_string(),
                reason: "not found".to_string()
            }
            .category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            LoaderError::FactoryFailed {
                reason: "boom".to_string()
            }
            .category(),
            ErrorCategory::External
        );
    }

    #[test]
    fn test_error_messages_name_the_path() {
        let err = LoaderError::PathResolution {
            path: "./modules".to_string(),
            reason: "No such file or directory".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("./modules"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_error_response_serialization() {
        let err = LoaderError::NotADirectory {
            path: "/etc/hosts".to_string(),
        };
        let response = err.to_error_response();

        let json = serde_json::to_string_pretty(&response).unwrap();
        assert!(json.contains("NOT_A_DIRECTORY"));
        assert!(json.contains("/etc/hosts"));
        assert!(json.contains("validation"));

        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error.code, "NOT_A_DIRECTORY");
        assert_eq!(parsed.error.category, ErrorCategory::Validation);
    }
}
