//! Caller-side variable references

use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

use super::request::ResolutionRequest;

/// A reference to a variable as presented by a caller.
///
/// All shapes normalize to a variable name plus an optional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableRef {
    /// A bare variable name.
    Name(String),
    /// A variable name with an optional argument.
    Named {
        /// Variable name.
        variable: String,
        /// Optional argument.
        arg: Option<String>,
    },
    /// A full resolution request.
    Request(ResolutionRequest),
}

impl VariableRef {
    /// Creates a name-plus-argument reference.
    #[must_use]
    pub fn with_arg(variable: impl Into<String>, arg: impl Into<String>) -> Self {
        Self::Named {
            variable: variable.into(),
            arg: Some(arg.into()),
        }
    }

    /// Returns the referenced variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Named { variable, .. } => variable,
            Self::Request(request) => &request.variable.name,
        }
    }

    /// Returns the argument, if any. A bare name never carries one.
    #[must_use]
    pub fn arg(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Named { arg, .. } => arg.as_deref(),
            Self::Request(request) => request.arg(),
        }
    }

    /// Splits the reference into its name and argument.
    #[must_use]
    pub fn into_parts(self) -> (String, Option<String>) {
        match self {
            Self::Name(name) => (name, None),
            Self::Named { variable, arg } => (variable, arg),
            Self::Request(request) => (request.variable.name, request.arg),
        }
    }
}

impl From<&str> for VariableRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for VariableRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<ResolutionRequest> for VariableRef {
    fn from(request: ResolutionRequest) -> Self {
        Self::Request(request)
    }
}

/// Parses `name` or `name:arg`, with an optional leading `#`.
///
/// Everything after the first `:` is the argument, so arguments may contain
/// colons themselves (`file:C:/notes.txt`).
impl FromStr for VariableRef {
    type Err = DomainError;

    fn from_str(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(DomainError::InvalidReference(input.to_string()));
        }

        let (name, arg) = match body.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (body, None),
        };

        if !is_valid_variable_name(name) {
            return Err(DomainError::InvalidVariableName(name.to_string()));
        }

        Ok(match arg {
            Some(arg) if !arg.is_empty() => Self::with_arg(name, arg),
            _ => Self::Name(name.to_string()),
        })
    }
}

/// Validates a variable name.
/// Valid names start with a letter or underscore, followed by alphanumerics,
/// underscores or hyphens.
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::variable::VariableDefinition;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_name_has_no_argument() {
        let reference = VariableRef::from("file");
        assert_eq!(reference.name(), "file");
        assert_eq!(reference.arg(), None);
    }

    #[test]
    fn request_reference_uses_definition_name() {
        let def = VariableDefinition::new("file-provider", "File", "Reads a file");
        let reference =
            VariableRef::from(ResolutionRequest::with_arg(def, Some("/a/b.txt".to_string())));
        assert_eq!(reference.name(), "File");
        assert_eq!(reference.arg(), Some("/a/b.txt"));
        assert_eq!(
            reference.into_parts(),
            ("File".to_string(), Some("/a/b.txt".to_string()))
        );
    }

    #[test]
    fn parse_name_and_argument() {
        let reference: VariableRef = "#file:C:/notes.txt".parse().unwrap();
        assert_eq!(reference, VariableRef::with_arg("file", "C:/notes.txt"));

        let reference: VariableRef = "today".parse().unwrap();
        assert_eq!(reference, VariableRef::Name("today".to_string()));
    }

    #[test]
    fn parse_empty_argument_is_bare_name() {
        let reference: VariableRef = "file:".parse().unwrap();
        assert_eq!(reference, VariableRef::Name("file".to_string()));
    }

    #[test]
    fn parse_rejects_invalid_names() {
        assert_eq!(
            "#".parse::<VariableRef>(),
            Err(DomainError::InvalidReference("#".to_string()))
        );
        assert!(matches!(
            "1file:x".parse::<VariableRef>(),
            Err(DomainError::InvalidVariableName(_))
        ));
    }

    #[test]
    fn valid_variable_names() {
        assert!(is_valid_variable_name("file"));
        assert!(is_valid_variable_name("_private"));
        assert!(is_valid_variable_name("current-file2"));
        assert!(!is_valid_variable_name(""));
        assert!(!is_valid_variable_name("9lives"));
        assert!(!is_valid_variable_name("a b"));
    }
}
