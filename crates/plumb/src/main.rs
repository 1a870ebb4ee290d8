// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plumb - plugin activation and wiring for the bundled catalog.
//!
//! This is the binary entry point.

mod catalog;
mod commands;
mod host;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use crate::commands::ListFilter;
use crate::host::Host;

/// Plumb - plugin activation and wiring.
#[derive(Parser, Debug)]
#[command(name = "plumb", version, about, long_about = None)]
struct Cli {
    /// Configuration file to use instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List plugins (active ones by default).
    List {
        /// Only built-in plugins, by their order.
        #[arg(long, conflicts_with_all = ["custom", "all"])]
        built_in: bool,
        /// Only custom plugins.
        #[arg(long, conflicts_with = "all")]
        custom: bool,
        /// Every plugin in the catalog, disabled ones included.
        #[arg(long)]
        all: bool,
    },
    /// Disable a plugin from the next start on.
    Disable { title: String },
    /// Re-enable a plugin from the next start on.
    Enable { title: String },
    /// Register all plugins and resolve the active ones.
    Init,
    /// Show a plugin's settings editor.
    Editor { title: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => plumb_config::load_and_validate_path(path),
        None => plumb_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            plumb_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);

    let output = Host::open(&config).and_then(|host| run(&host, cli.command));
    match output {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("plumb: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(host: &Host, command: Commands) -> Result<String, plumb_core::PlumbError> {
    match command {
        Commands::List {
            built_in,
            custom,
            all,
        } => {
            let filter = match (built_in, custom, all) {
                (true, _, _) => ListFilter::BuiltIn,
                (_, true, _) => ListFilter::Custom,
                (_, _, true) => ListFilter::All,
                _ => ListFilter::Active,
            };
            Ok(commands::list(host, filter))
        }
        Commands::Disable { title } => commands::disable(host, &title),
        Commands::Enable { title } => commands::enable(host, &title),
        Commands::Init => commands::init(host),
        Commands::Editor { title } => commands::editor(host, &title),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plumb={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
