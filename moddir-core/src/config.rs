//! Configuration for the directory loader

use serde::{Deserialize, Serialize};

/// Loader configuration
///
/// All fields have defaults, so an empty config document (`{}`) yields the
/// stock behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Eligible-file suffix override; the source's own suffix is used when
    /// absent. A leading `.` is added when missing.
    #[serde(default)]
    pub suffix: Option<String>,

    /// Whether to log a warning when two files resolve to the same registry
    /// name (the later file still wins either way)
    #[serde(default = "default_true")]
    pub collision_warnings: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            suffix: None,
            collision_warnings: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: LoaderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.suffix, None);
        assert!(config.collision_warnings);
    }

    #[test]
    fn test_overrides_deserialize() {
        let config: LoaderConfig = serde_json::from_str(
            r#"{"suffix": ".module.json", "collision_warnings": false}"#,
        )
        .unwrap();
        assert_eq!(config.suffix.as_deref(), Some(".module.json"));
        assert!(!config.collision_warnings);
    }
}
