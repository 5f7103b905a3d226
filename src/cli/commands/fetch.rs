//! Dataset fetch command.
//!
//! `datarun fetch` downloads one dataset and saves it under the target
//! directory. When used as a pipeline step, a failed download exits non-zero
//! and the runner records the failure like any other step failure.

use crate::cli::args::FetchArgs;
use crate::error::Result;
use crate::fetch::DataFetcher;

use super::dispatcher::{Command, CommandResult};

/// The fetch command implementation.
pub struct FetchCommand {
    args: FetchArgs,
}

impl FetchCommand {
    /// Create a new fetch command.
    pub fn new(args: FetchArgs) -> Self {
        Self { args }
    }
}

impl Command for FetchCommand {
    fn execute(&self) -> Result<CommandResult> {
        let fetcher = DataFetcher::new();
        fetcher
            .download(&self.args.url, &self.args.dir, &self.args.filename)?;
        Ok(CommandResult::success())
    }
}
