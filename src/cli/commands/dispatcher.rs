//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. No subcommand means `run` with default arguments.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                let cmd =
                    super::run::RunCommand::new(&self.project_root, cli.config.clone(), args.clone());
                cmd.execute()
            }
            Some(Commands::Fetch(args)) => {
                let cmd = super::fetch::FetchCommand::new(args.clone());
                cmd.execute()
            }
            Some(Commands::Process(args)) => {
                let cmd = super::process::ProcessCommand::new(args.clone());
                cmd.execute()
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute()
            }
            None => {
                let cmd = super::run::RunCommand::new(
                    &self.project_root,
                    cli.config.clone(),
                    crate::cli::args::RunArgs::default(),
                );
                cmd.execute()
            }
        }
    }
}
