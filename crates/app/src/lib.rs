//! ctxvar - Context variable registry command line
//!
//! Wires the built-in contributions to real adapters and exposes the
//! subcommands of the `ctxvar` binary.

pub mod cli;
pub mod commands;
pub mod registry;

pub use cli::{Cli, Command};
pub use registry::{build_service, build_service_with};
