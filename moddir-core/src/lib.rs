//! # Moddir Core - directory-based component registry builder
//!
//! Given a directory and a caller-supplied context value, moddir discovers
//! all eligible files directly inside that directory (non-recursive), loads
//! each one through a [`ModuleSource`], optionally invokes it as a factory
//! with the context, and assembles the results into a single flat
//! name-to-instance [`Registry`].
//!
//! The pipeline is fully synchronous and read-only with respect to the
//! filesystem. One bad file aborts the whole build; there are no partial
//! registries.
//!
//! ## Example
//!
//! ```rust
//! use moddir_core::load;
//! use serde_json::json;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(
//!     dir.path().join("limits.json"),
//!     r#"{"max_sessions": 8}"#,
//! ).unwrap();
//! std::fs::write(
//!     dir.path().join("audit.json"),
//!     r#"{"name": "trace", "retention_days": 30}"#,
//! ).unwrap();
//!
//! let registry = load(dir.path().to_str().unwrap(), &json!({})).unwrap();
//!
//! // Keyed by the suffix-stripped filename, unless the instance names itself.
//! assert_eq!(registry["limits"]["max_sessions"], json!(8));
//! assert_eq!(registry["trace"]["retention_days"], json!(30));
//! ```
//!
//! Custom file formats (or actual code loading) plug in through the
//! [`ModuleSource`] trait; [`JsonSource`] is the built-in one.

pub mod config;
pub mod error;
pub mod loader;
pub mod resolver;
pub mod source;

// Re-export main types
pub use config::LoaderConfig;
pub use error::{ErrorCategory, ErrorDetail, ErrorResponse, LoaderError, Result};
pub use loader::{DirLoader, Registry};
pub use resolver::resolve_module_path;
pub use source::{instantiate, JsonSource, ModuleExport, ModuleInstance, ModuleSource};

use serde_json::Value;

/// Load all JSON modules directly under `path` into a fresh registry.
///
/// Convenience wrapper over [`DirLoader::new`] with the built-in
/// [`JsonSource`]; `context` is forwarded to any factory the source produces.
pub fn load(path: &str, context: &Value) -> Result<Registry<Value>> {
    DirLoader::new(JsonSource::new()).load(path, context)
}
