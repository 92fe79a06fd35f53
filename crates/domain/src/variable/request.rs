//! Resolution requests and results

use serde::{Deserialize, Serialize};

use super::definition::VariableDefinition;

/// The unit handed to resolver probes and resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionRequest {
    /// The variable being resolved.
    pub variable: VariableDefinition,
    /// Optional argument supplied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
}

impl ResolutionRequest {
    /// Creates a request without an argument.
    #[must_use]
    pub const fn new(variable: VariableDefinition) -> Self {
        Self {
            variable,
            arg: None,
        }
    }

    /// Creates a request with an optional argument.
    #[must_use]
    pub const fn with_arg(variable: VariableDefinition, arg: Option<String>) -> Self {
        Self { variable, arg }
    }

    /// Returns the argument as a string slice.
    #[must_use]
    pub fn arg(&self) -> Option<&str> {
        self.arg.as_deref()
    }
}

/// A variable turned into a concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedVariable {
    /// The resolved variable.
    pub variable: VariableDefinition,
    /// The argument used for resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    /// Value inserted at the usage site.
    pub value: String,
    /// Additional material available to agents but not inserted inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_value: Option<String>,
}

impl ResolvedVariable {
    /// Creates a resolved value without argument or context value.
    #[must_use]
    pub fn new(variable: VariableDefinition, value: impl Into<String>) -> Self {
        Self {
            variable,
            arg: None,
            value: value.into(),
            context_value: None,
        }
    }

    /// Sets the context value.
    #[must_use]
    pub fn with_context_value(mut self, context_value: impl Into<String>) -> Self {
        self.context_value = Some(context_value.into());
        self
    }

    /// Replaces the reported argument.
    #[must_use]
    pub fn with_arg(mut self, arg: Option<String>) -> Self {
        self.arg = arg;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolved_variable_uses_camel_case_context_value() {
        let def = VariableDefinition::new("file-provider", "file", "Reads a file");
        let resolved = ResolvedVariable::new(def, "b.txt").with_context_value("hello");

        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["contextValue"], "hello");
        assert!(json.get("arg").is_none());
    }

    #[test]
    fn with_arg_overrides_reported_argument() {
        let def = VariableDefinition::new("file-provider", "file", "Reads a file");
        let resolved = ResolvedVariable::new(def, "b.txt")
            .with_arg(Some("/other".to_string()))
            .with_arg(Some("/a/b.txt".to_string()));
        assert_eq!(resolved.arg.as_deref(), Some("/a/b.txt"));
    }
}
