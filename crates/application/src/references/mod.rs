//! Variable references in chat text
//!
//! Provides parsing of `#variable` and `#variable:argument` references.
//!
//! # Usage
//!
//! ```
//! use ctxvar_application::references::parse_references;
//!
//! let refs = parse_references("Explain #file:src/main.rs using #today");
//! assert_eq!(refs.len(), 2);
//! assert_eq!(refs[0].name, "file");
//! assert_eq!(refs[0].arg.as_deref(), Some("src/main.rs"));
//! assert_eq!(refs[1].arg, None);
//! ```

pub mod parser;

pub use parser::{VariableReference, extract_variable_names, has_references, parse_references};
