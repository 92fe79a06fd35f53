//! Application error types

use ctxvar_domain::DomainError;
use thiserror::Error;

/// Application-level errors.
///
/// The variable service itself models failure as absence; these errors only
/// surface from use cases that face outer layers (CLI input, adapters).
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The requested variable could not be resolved.
    #[error("no value for variable: {0}")]
    NoValue(String),

    /// The user dismissed an interactive selection.
    #[error("selection cancelled")]
    Cancelled,
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
