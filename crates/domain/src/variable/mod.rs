//! Context variable domain types

mod context;
mod definition;
mod reference;
mod request;

pub use context::VariableContext;
pub use definition::{VariableArgument, VariableDefinition, VariableKey};
pub use reference::{VariableRef, is_valid_variable_name};
pub use request::{ResolutionRequest, ResolvedVariable};
