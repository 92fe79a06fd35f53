//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A variable name is empty or contains characters outside the allowed set.
    #[error("invalid variable name: {0}")]
    InvalidVariableName(String),

    /// A textual variable reference is malformed.
    #[error("invalid variable reference: {0}")]
    InvalidReference(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
