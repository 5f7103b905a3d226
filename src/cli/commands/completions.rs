//! Shell completions generation.
//!
//! The `datarun completions` command generates shell completion scripts.

use crate::cli::args::{Cli, CompletionsArgs};
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

impl Command for CompletionsCommand {
    fn execute(&self) -> crate::error::Result<CommandResult> {
        let mut cmd = Cli::command();
        clap_complete::generate(self.args.shell, &mut cmd, "datarun", &mut std::io::stdout());
        Ok(CommandResult::success())
    }
}
