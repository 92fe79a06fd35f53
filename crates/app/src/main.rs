//! ctxvar - Main Entry Point
//!
//! Loads settings, initializes logging, builds the variable registry and
//! runs the requested subcommand.

use std::io::{self, Read};

use anyhow::Context;
use clap::Parser;
use ctxvar::{Cli, Command, build_service_with, commands};
use ctxvar_infrastructure::{SettingsRepository, TerminalQuickInput};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let repository = cli
        .config
        .clone()
        .map_or_else(SettingsRepository::new, SettingsRepository::with_path);
    let mut settings = repository
        .load_with_env()
        .await
        .context("failed to load settings")?;

    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    for root in &cli.workspace {
        settings.add_workspace_root(std::path::absolute(root)?);
    }
    if settings.workspace_roots.is_empty() {
        settings.add_workspace_root(std::env::current_dir()?);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        roots = settings.workspace_roots.len(),
        "starting ctxvar"
    );

    // The variable prompt and the file picker read from one stdin buffer
    let quick_input = TerminalQuickInput::new();
    let service = build_service_with(&settings, quick_input.clone());
    let mut stdout = io::stdout();

    match cli.command {
        Command::List { json } => commands::list(&service, json, &mut stdout),
        Command::Resolve { name, arg, context } => {
            commands::resolve(service, &name, arg.as_deref(), context, &mut stdout).await
        }
        Command::Expand { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    io::stdin()
                        .read_to_string(&mut buffer)
                        .context("failed to read text from stdin")?;
                    buffer
                }
            };
            commands::expand(service, &text, &mut stdout).await
        }
        Command::Pick { resolve } => {
            commands::pick(service, quick_input, resolve, &mut stdout).await
        }
    }
}
