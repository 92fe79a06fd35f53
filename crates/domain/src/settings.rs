//! Settings Domain Model
//!
//! Defines the user-tunable configuration for the variable registry and its
//! built-in contributions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::variable::VariableKey;

/// ctxvar settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Workspace roots used to relativize file paths and to list pickable files.
    #[serde(default)]
    pub workspace_roots: Vec<PathBuf>,

    /// Default log filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound for the size of a file context value, in bytes.
    #[serde(default = "default_max_context_bytes")]
    pub max_context_bytes: usize,

    /// Variables removed from the registry after contributions ran.
    #[serde(default)]
    pub disabled_variables: Vec<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_max_context_bytes() -> usize {
    256 * 1024
}

impl Settings {
    /// Returns true if the named variable is disabled (case-insensitive).
    #[must_use]
    pub fn is_disabled(&self, name: &str) -> bool {
        let key = VariableKey::new(name);
        self.disabled_variables
            .iter()
            .any(|disabled| VariableKey::new(disabled) == key)
    }

    /// Adds a workspace root unless it is already present.
    pub fn add_workspace_root(&mut self, root: impl AsRef<Path>) {
        let root = root.as_ref();
        if !self.workspace_roots.iter().any(|r| r == root) {
            self.workspace_roots.push(root.to_path_buf());
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workspace_roots: Vec::new(),
            log_level: default_log_level(),
            max_context_bytes: default_max_context_bytes(),
            disabled_variables: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert!(settings.workspace_roots.is_empty());
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.max_context_bytes, 262_144);
        assert!(settings.disabled_variables.is_empty());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"disabledVariables":["Today"]}"#).unwrap();
        assert_eq!(settings.log_level, "warn");
        assert!(settings.is_disabled("today"));
        assert!(!settings.is_disabled("file"));
    }

    #[test]
    fn add_workspace_root_deduplicates() {
        let mut settings = Settings::default();
        settings.add_workspace_root("/ws");
        settings.add_workspace_root("/ws");
        assert_eq!(settings.workspace_roots, vec![PathBuf::from("/ws")]);
    }
}
