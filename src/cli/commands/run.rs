//! Pipeline run command.
//!
//! Loads the configuration, applies the CLI overrides, and drives the
//! pipeline. The process exit code communicates the aggregate outcome to
//! automated callers (schedulers, cron): 0 full success, 1 precondition
//! failure, 2 completed with step failures, or the failing step's own code
//! when stop-on-error triggered.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::runner::{Pipeline, RunStatus};

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_path: Option<PathBuf>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path,
            args,
        }
    }
}

impl Command for RunCommand {
    fn execute(&self) -> Result<CommandResult> {
        let mut config = load_config(&self.project_root, self.config_path.as_deref())?;

        if let Some(delay) = self.args.delay {
            config.delay_seconds = delay;
        }
        if self.args.stop_on_error {
            config.stop_on_error = true;
        }
        config.validate()?;

        let report = Pipeline::new(&config, &self.project_root).run();
        tracing::debug!(
            "Run finished in {:.1}s with {} step(s) attempted",
            report.duration.as_secs_f64(),
            report.records.len()
        );

        match report.status {
            RunStatus::Success => Ok(CommandResult::success()),
            status => Ok(CommandResult::failure(status.exit_code())),
        }
    }
}
