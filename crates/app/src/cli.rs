//! Command line definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Resolve context variables for chat prompts.
#[derive(Debug, Parser)]
#[command(name = "ctxvar", version, about)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Additional workspace root; may be repeated
    #[arg(long = "workspace", short = 'w', global = true)]
    pub workspace: Vec<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// `ctxvar` subcommands.
#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// List registered variables
    List {
        /// Print definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve a single variable
    Resolve {
        /// Variable name, optionally prefixed with `#`
        name: String,

        /// Argument passed to the variable
        arg: Option<String>,

        /// Also print the context value
        #[arg(long)]
        context: bool,
    },

    /// Expand `#name[:arg]` references in text (read from stdin when omitted)
    Expand {
        /// Text to expand
        text: Option<String>,
    },

    /// Pick a variable and its argument interactively
    Pick {
        /// Resolve the picked reference instead of printing it
        #[arg(long)]
        resolve: bool,
    },
}
