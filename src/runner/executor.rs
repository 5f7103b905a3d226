//! Child-process step execution.
//!
//! Runs one resolved step as an isolated child process with an explicit
//! working directory and captured output, and classifies the outcome. A
//! failure to launch is not a failure reported by the step, so the two are
//! kept apart in [`ExecOutcome`] instead of being folded into one integer.

use crate::runner::resolver::ResolvedStep;
use std::io;
use std::process::Command;
use std::time::{Duration, Instant};

/// Exit code reported when the executable or interpreter cannot be found.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code reported for any other operating-system launch failure.
pub const EXIT_LAUNCH_FAILED: i32 = 126;

/// How a step invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The child ran to termination with this exit code.
    Exited(i32),

    /// The executable or interpreter could not be located at invocation time.
    NotFound,

    /// The operating system reported a launch error other than not-found.
    LaunchFailed,
}

impl ExecOutcome {
    /// Integer status for reporting. `NotFound` and `LaunchFailed` use the
    /// reserved sentinel codes; a step that itself exits 126/127 stays
    /// distinguishable through the variant.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecOutcome::Exited(code) => *code,
            ExecOutcome::NotFound => EXIT_NOT_FOUND,
            ExecOutcome::LaunchFailed => EXIT_LAUNCH_FAILED,
        }
    }

    /// True only for a normal termination with exit code 0.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecOutcome::Exited(0))
    }
}

/// Result of executing a single step.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Classified outcome.
    pub outcome: ExecOutcome,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,

    /// Wall-clock duration of the invocation.
    pub duration: Duration,
}

impl ExecutionResult {
    fn launch_error(err: &io::Error, duration: Duration) -> Self {
        let outcome = if err.kind() == io::ErrorKind::NotFound {
            ExecOutcome::NotFound
        } else {
            ExecOutcome::LaunchFailed
        };
        Self {
            outcome,
            stdout: String::new(),
            stderr: err.to_string(),
            duration,
        }
    }
}

/// Execute one resolved step and wait for it to terminate.
///
/// The child's working directory is set explicitly to the step's run
/// directory so relative paths inside the step behave the same no matter
/// where the runner itself was invoked from. With an interpreter configured
/// the invocation is `<interpreter> <path> [extra...]`, otherwise the
/// resolved path is executed directly. There is no timeout: a hung step
/// blocks until it terminates.
pub fn execute_step(
    step: &ResolvedStep,
    interpreter: Option<&str>,
    extra_args: &[String],
) -> ExecutionResult {
    let start = Instant::now();

    let mut cmd = match interpreter {
        Some(interpreter) => {
            let mut cmd = Command::new(interpreter);
            cmd.arg(&step.path);
            cmd
        }
        None => Command::new(&step.path),
    };
    cmd.args(extra_args);
    cmd.current_dir(&step.run_dir);

    match cmd.output() {
        Ok(output) => {
            // A signal-terminated child has no exit code; report it as a
            // generic failure.
            let code = output.status.code().unwrap_or(1);
            ExecutionResult {
                outcome: ExecOutcome::Exited(code),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                duration: start.elapsed(),
            }
        }
        Err(err) => ExecutionResult::launch_error(&err, start.elapsed()),
    }
}
