//! File-based persistence and file system access.

mod file_system;
mod settings_repository;

pub use file_system::*;
pub use settings_repository::*;
