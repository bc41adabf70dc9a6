//! Module sources and instantiation
//!
//! A [`ModuleSource`] is the seam between the directory loader and whatever
//! mechanism actually turns one file into a value: a data format, an embedded
//! interpreter, a dynamic library, anything. The loader only cares about the
//! shape of the result, captured by [`ModuleExport`]: either a factory to be
//! invoked with the caller's context, or an already-constructed instance.
//!
//! Sources are contractually uncached: every `load_export` call re-reads the
//! file, so a file changed on disk is observed by the next registry build in
//! the same process. Implementations must not memoize results by path.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{LoaderError, Result};

/// The raw value obtained from loading one eligible file.
///
/// The factory-vs-value decision is carried explicitly in the type rather
/// than probed at runtime: a source that reads something callable returns
/// `Factory`, everything else returns `Instance`.
pub enum ModuleExport<C, T> {
    /// A unary factory; the loader invokes it with the caller's context
    /// exactly once and uses the return value as the instance.
    Factory(Box<dyn FnOnce(&C) -> Result<T>>),
    /// An already-constructed instance, used directly.
    Instance(T),
}

impl<C, T: fmt::Debug> fmt::Debug for ModuleExport<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleExport::Factory(_) => f.write_str("ModuleExport::Factory(..)"),
            ModuleExport::Instance(v) => f.debug_tuple("ModuleExport::Instance").field(v).finish(),
        }
    }
}

/// Naming capability of a module instance.
///
/// An instance may carry its own registry name; the loader falls back to the
/// suffix-stripped filename when it does not. A `Some("")` name is treated
/// the same as no name.
pub trait ModuleInstance {
    /// The instance's self-declared registry name, if any.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// The file-loading collaborator the directory loader depends on.
///
/// # Contract
///
/// - `load_export` reads the file fresh on every call; no caching by path.
/// - `Ok(None)` means the file loaded to nothing (the absent case); the
///   loader skips it without registering anything.
/// - Errors propagate unmodified and abort the whole registry build.
pub trait ModuleSource {
    /// Opaque caller-provided value handed to every factory invocation.
    type Context;
    /// The instance type this source produces.
    type Instance: ModuleInstance;

    /// Eligible-file suffix for this source, e.g. `".json"`. Compared
    /// case-insensitively against file names by the loader.
    fn suffix(&self) -> &str;

    /// Load the export of a single file.
    fn load_export(
        &self,
        path: &Path,
    ) -> Result<Option<ModuleExport<Self::Context, Self::Instance>>>;
}

/// Resolve an export to its final instance.
///
/// Pattern-matches the factory-vs-value tag: factories are invoked with
/// `context` exactly once and their errors propagate unmodified.
pub fn instantiate<C, T>(export: ModuleExport<C, T>, context: &C) -> Result<T> {
    match export {
        ModuleExport::Factory(factory) => factory(context),
        ModuleExport::Instance(instance) => Ok(instance),
    }
}

/// Built-in source for plain JSON module files.
///
/// Reads `*.json` files with [`serde_json`]; a top-level `null` document is
/// the absent case and is skipped. Instances are [`serde_json::Value`]s and
/// take their registry name from a top-level non-empty string `"name"` field
/// when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSource;

impl JsonSource {
    pub fn new() -> Self {
        Self
    }
}

impl ModuleSource for JsonSource {
    type Context = Value;
    type Instance = Value;

    fn suffix(&self) -> &str {
        ".json"
    }

    fn load_export(&self, path: &Path) -> Result<Option<ModuleExport<Value, Value>>> {
        let content = fs::read_to_string(path).map_err(|e| LoaderError::ModuleLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|e| LoaderError::ModuleLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if value.is_null() {
            return Ok(None);
        }

        Ok(Some(ModuleExport::Instance(value)))
    }
}

impl ModuleInstance for Value {
    fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }
}
