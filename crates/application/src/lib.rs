//! ctxvar Application - Variable service, ports and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (resolvers, argument pickers, contributions, quick input, file system)
//! - The variable registry and its resolver selection protocol
//! - Built-in contributions written against ports
//! - Use case orchestration
//! - Application-level error handling

pub mod contributions;
pub mod error;
pub mod ports;
pub mod references;
pub mod use_cases;
pub mod variable_service;

pub use contributions::{FileVariableContribution, TodayVariableContribution};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    ArgumentPicker, Clock, FileSystem, FileSystemError, FnArgumentPicker, QuickInput,
    QuickPickItem, ResolverError, VariableContribution, VariableResolver,
};
pub use use_cases::{
    PickContextVariable, ResolveReferences, ResolveReferencesOutput, CONTEXT_VARIABLE_PICKER,
};
pub use variable_service::{DefaultVariableService, Disposable, VariableService};
