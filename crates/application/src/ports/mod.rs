//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the variable registry and the code
//! that feeds it or consumes it. Each port is a trait implemented either by
//! contributions in this crate or by adapters in the infrastructure layer.

mod argument_picker;
mod clock;
mod contribution;
mod file_system;
mod quick_input;
mod resolver;

pub use argument_picker::{ArgumentPicker, FnArgumentPicker};
pub use clock::Clock;
pub use contribution::VariableContribution;
pub use file_system::{FileSystem, FileSystemError};
pub use quick_input::{QuickInput, QuickPickItem};
pub use resolver::{ResolverError, VariableResolver};
