//! Deterministic JSON serialization for settings and command output.
//!
//! - 2-space indentation
//! - Trailing newline
//! - Object keys in declaration order (or sorted, for `BTreeMap`s)

mod json;

pub use json::*;
