//! Situational data passed from callers through to resolvers

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open-ended bag of situational data (chat session, editor, picker source).
///
/// The registry never looks inside; it hands the context unmodified to every
/// probe, resolver and argument picker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableContext {
    values: BTreeMap<String, Value>,
}

impl VariableContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with a single `type` entry.
    #[must_use]
    pub fn of_type(kind: impl Into<String>) -> Self {
        Self::new().with("type", kind.into())
    }

    /// Adds an entry and returns the context.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Returns the value for a key if it is a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Returns the `type` entry, if any.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.get_str("type")
    }

    /// Returns true if the context carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
