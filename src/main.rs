//! Datarun CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use datarun::cli::{Cli, CommandDispatcher};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `--quiet` flag restricts to warnings and errors
/// 3. `RUST_LOG` environment variable (if set)
/// 4. Default is INFO
fn init_tracing(debug: bool, quiet: bool) {
    let filter = if debug {
        EnvFilter::new("datarun=debug")
    } else if quiet {
        EnvFilter::new("datarun=warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("datarun=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.quiet);

    tracing::debug!("Datarun starting with args: {:?}", cli);

    // Determine project root
    let project_root = cli
        .project
        .as_ref()
        .cloned()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let dispatcher = CommandDispatcher::new(project_root);

    match dispatcher.dispatch(&cli) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            tracing::error!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
