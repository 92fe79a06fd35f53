//! ctxvar Domain - Core variable types
//!
//! This crate defines the data model shared by the variable registry,
//! its contributions and its callers.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod settings;
pub mod variable;

pub use error::{DomainError, DomainResult};
pub use settings::Settings;
pub use variable::{
    ResolutionRequest, ResolvedVariable, VariableArgument, VariableContext, VariableDefinition,
    VariableKey, VariableRef, is_valid_variable_name,
};
