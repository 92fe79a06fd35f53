//! Variable definitions and their lookup keys

use std::fmt;

use serde::{Deserialize, Serialize};

/// Describes one argument a variable needs before it can be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableArgument {
    /// Argument name.
    pub name: String,
    /// Human-readable explanation of the argument.
    #[serde(default)]
    pub description: String,
}

impl VariableArgument {
    /// Creates a new argument description.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Label shown when the argument is offered for selection.
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.description)
        }
    }
}

/// Identifies a kind of context variable.
///
/// The `name` is the identity of the variable inside a registry and is
/// compared case-insensitively (see [`VariableKey`]). The `id` names the
/// contribution that provides it and is not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDefinition {
    /// Identifier of the contributing provider.
    pub id: String,
    /// Name used to reference the variable.
    pub name: String,
    /// Human-readable explanation.
    pub description: String,
    /// Display name; the name is shown when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Arguments required for resolution. Empty means no argument.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<VariableArgument>,
}

impl VariableDefinition {
    /// Creates a definition without label or arguments.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            label: None,
            args: Vec::new(),
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Appends a declared argument.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.args.push(VariableArgument::new(name, description));
        self
    }

    /// Returns the label, falling back to the name.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Returns true if resolution needs an argument.
    #[must_use]
    pub fn takes_argument(&self) -> bool {
        !self.args.is_empty()
    }

    /// Returns the normalized registry key for this definition.
    #[must_use]
    pub fn key(&self) -> VariableKey {
        VariableKey::new(&self.name)
    }
}

/// Case-insensitive registry key derived from a variable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableKey(String);

impl VariableKey {
    /// Normalizes a variable name into a key.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    /// Returns the normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariableKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
