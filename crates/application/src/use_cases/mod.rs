//! Application use cases (orchestration on top of the variable service).

mod pick_context_variable;
mod resolve_references;

pub use pick_context_variable::{CONTEXT_VARIABLE_PICKER, PickContextVariable};
pub use resolve_references::{ResolveReferences, ResolveReferencesOutput};
