//! Pipeline orchestration.
//!
//! Drives the configured steps in order: resolve everything up front, then
//! execute each step as a child process, replay its output through the
//! logger, list the watched directories, apply the continue/abort policy,
//! and wait the configured delay before the next step. Strictly sequential;
//! nothing overlaps a running step or a delay.

use crate::config::RunnerConfig;
use crate::runner::executor::{execute_step, ExecOutcome, ExecutionResult};
use crate::runner::inspect::inspect_after_step;
use crate::runner::resolver::resolve_steps;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Suspension primitive for the inter-step delay.
///
/// Production uses [`BlockingTimer`]; tests inject a recording timer so the
/// delay policy is observable without actually sleeping.
pub trait DelayTimer {
    fn wait(&self, delay: Duration);
}

/// Unconditional blocking sleep.
pub struct BlockingTimer;

impl DelayTimer for BlockingTimer {
    fn wait(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// One attempted step and its outcome, in execution order.
#[derive(Debug)]
pub struct StepRecord {
    /// Step name as configured.
    pub name: String,

    /// Execution outcome and captured output.
    pub result: ExecutionResult,
}

/// A failed step, by name and reported exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub name: String,
    pub exit_code: i32,
}

/// Final aggregate outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Every step exited zero.
    Success,

    /// One or more steps could not be resolved (or nothing was left to run);
    /// no step was executed past this point.
    MissingSteps(Vec<String>),

    /// Every step was attempted but at least one failed.
    CompletedWithFailures,

    /// The run stopped at the first failure; carries that step's exit code.
    Aborted { code: i32 },
}

impl RunStatus {
    /// Process exit code communicated to automated callers.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Success => 0,
            RunStatus::MissingSteps(_) => 1,
            RunStatus::CompletedWithFailures => 2,
            RunStatus::Aborted { code } => *code,
        }
    }
}

/// Aggregate of a whole run.
#[derive(Debug)]
pub struct RunReport {
    /// Every attempted step in order.
    pub records: Vec<StepRecord>,

    /// Failing steps in the order they failed.
    pub failures: Vec<StepFailure>,

    /// Final aggregate status.
    pub status: RunStatus,

    /// Total wall-clock duration including delays.
    pub duration: Duration,
}

/// Executes the full pipeline described by a [`RunnerConfig`].
pub struct Pipeline<'a> {
    config: &'a RunnerConfig,
    project_root: PathBuf,
    timer: Box<dyn DelayTimer>,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with the production blocking timer.
    pub fn new(config: &'a RunnerConfig, project_root: &Path) -> Self {
        Self::with_timer(config, project_root, Box::new(BlockingTimer))
    }

    /// Create a pipeline with an injected delay timer.
    pub fn with_timer(
        config: &'a RunnerConfig,
        project_root: &Path,
        timer: Box<dyn DelayTimer>,
    ) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
            timer,
        }
    }

    fn run_dir(&self) -> PathBuf {
        match &self.config.run_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.project_root.join(dir),
            None => self.project_root.clone(),
        }
    }

    /// Run every step in order and return the aggregate report.
    pub fn run(&self) -> RunReport {
        let started = Instant::now();
        let run_dir = self.run_dir();

        info!("Starting pipeline run for {} steps...", self.config.steps.len());
        info!("Project root: {}", self.project_root.display());
        info!("Run directory (cwd for steps): {}", run_dir.display());

        let resolution = resolve_steps(&self.config.steps, &run_dir, &self.project_root);

        if !resolution.missing.is_empty() {
            let joined = resolution.missing.join(", ");
            if self.config.skip_missing {
                warn!("Skipping steps that were not found: {joined}");
            } else {
                error!("The following steps were not found: {joined}");
                return RunReport {
                    records: Vec::new(),
                    failures: Vec::new(),
                    status: RunStatus::MissingSteps(resolution.missing),
                    duration: started.elapsed(),
                };
            }
        }

        if resolution.resolved.is_empty() {
            error!("No steps left to run.");
            return RunReport {
                records: Vec::new(),
                failures: Vec::new(),
                status: RunStatus::MissingSteps(resolution.missing),
                duration: started.elapsed(),
            };
        }

        let total = resolution.resolved.len();
        let mut records = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (idx, step) in resolution.resolved.iter().enumerate() {
            let position = idx + 1;
            info!("({position}/{total}) {}", step.name);

            let result = execute_step(
                step,
                self.config.interpreter.as_deref(),
                self.config.args_for(&step.name),
            );
            self.log_step_end(&step.name, &result);

            // Post-step visibility runs no matter how the step ended.
            inspect_after_step(&self.config.watch_dirs, &run_dir);

            let exit_code = result.outcome.exit_code();
            let failed = !result.outcome.is_success();
            records.push(StepRecord {
                name: step.name.clone(),
                result,
            });

            if failed {
                failures.push(StepFailure {
                    name: step.name.clone(),
                    exit_code,
                });
                if self.config.stop_on_error {
                    error!("Stopping due to failure and stop_on_error=true.");
                    return RunReport {
                        records,
                        failures,
                        status: RunStatus::Aborted { code: exit_code },
                        duration: started.elapsed(),
                    };
                }
            }

            if position < total {
                info!(
                    "Waiting {} seconds before next step...",
                    self.config.delay_seconds
                );
                self.timer.wait(Duration::from_secs(self.config.delay_seconds));
            }
        }

        let status = if failures.is_empty() {
            info!("All steps ran successfully.");
            RunStatus::Success
        } else {
            warn!("Completed with failures:");
            for failure in &failures {
                warn!(" - {} (exit code {})", failure.name, failure.exit_code);
            }
            RunStatus::CompletedWithFailures
        };

        RunReport {
            records,
            failures,
            status,
            duration: started.elapsed(),
        }
    }

    fn log_step_end(&self, name: &str, result: &ExecutionResult) {
        // Captured output is replayed line by line, attributed to the step.
        for line in result.stdout.lines() {
            debug!("[{name}][stdout] {line}");
        }
        if matches!(result.outcome, ExecOutcome::Exited(_)) {
            for line in result.stderr.lines() {
                warn!("[{name}][stderr] {line}");
            }
        }

        match &result.outcome {
            ExecOutcome::Exited(0) => info!("Completed {name} (exit code 0)."),
            ExecOutcome::Exited(code) => error!("{name} failed (exit code {code})."),
            ExecOutcome::NotFound => error!(
                "Executable or interpreter not found when running {name}: {}",
                result.stderr.trim()
            ),
            ExecOutcome::LaunchFailed => {
                error!("OS error when running {name}: {}", result.stderr.trim())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Records requested waits instead of sleeping.
    struct RecordingTimer(Arc<Mutex<Vec<Duration>>>);

    impl DelayTimer for RecordingTimer {
        fn wait(&self, delay: Duration) {
            self.0.lock().unwrap().push(delay);
        }
    }

    fn recording_timer() -> (Box<dyn DelayTimer>, Arc<Mutex<Vec<Duration>>>) {
        let waits = Arc::new(Mutex::new(Vec::new()));
        (Box::new(RecordingTimer(Arc::clone(&waits))), waits)
    }

    #[cfg(unix)]
    fn write_step(dir: &std::path::Path, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn config_with_steps(steps: &[&str]) -> RunnerConfig {
        RunnerConfig {
            steps: steps.iter().map(|s| s.to_string()).collect(),
            delay_seconds: 7,
            ..Default::default()
        }
    }

    #[test]
    fn run_status_exit_codes() {
        assert_eq!(RunStatus::Success.exit_code(), 0);
        assert_eq!(RunStatus::MissingSteps(vec!["x".into()]).exit_code(), 1);
        assert_eq!(RunStatus::CompletedWithFailures.exit_code(), 2);
        assert_eq!(RunStatus::Aborted { code: 5 }.exit_code(), 5);
    }

    #[test]
    #[cfg(unix)]
    fn runs_every_step_in_order() {
        let temp = TempDir::new().unwrap();
        for name in ["one.sh", "two.sh", "three.sh"] {
            write_step(temp.path(), name, &format!("echo {name} >> order.log"));
        }
        let config = config_with_steps(&["one.sh", "two.sh", "three.sh"]);
        let (timer, waits) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        assert_eq!(report.status, RunStatus::Success);
        assert_eq!(report.records.len(), 3);
        assert!(report.failures.is_empty());

        let order = fs::read_to_string(temp.path().join("order.log")).unwrap();
        let lines: Vec<&str> = order.lines().collect();
        assert_eq!(lines, vec!["one.sh", "two.sh", "three.sh"]);

        // N-1 delays, each the configured duration.
        let waits = waits.lock().unwrap();
        assert_eq!(waits.len(), 2);
        assert!(waits.iter().all(|w| *w == Duration::from_secs(7)));
    }

    #[test]
    #[cfg(unix)]
    fn continues_past_failure_by_default() {
        let temp = TempDir::new().unwrap();
        write_step(temp.path(), "a.sh", "exit 0");
        write_step(temp.path(), "b.sh", "exit 1");
        write_step(temp.path(), "c.sh", "touch c-ran");
        let config = config_with_steps(&["a.sh", "b.sh", "c.sh"]);
        let (timer, _) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        assert_eq!(report.status, RunStatus::CompletedWithFailures);
        assert_eq!(report.status.exit_code(), 2);
        assert_eq!(report.records.len(), 3);
        assert_eq!(
            report.failures,
            vec![StepFailure {
                name: "b.sh".into(),
                exit_code: 1
            }]
        );
        assert!(temp.path().join("c-ran").exists());
    }

    #[test]
    #[cfg(unix)]
    fn stop_on_error_aborts_without_trailing_delay() {
        let temp = TempDir::new().unwrap();
        write_step(temp.path(), "a.sh", "exit 0");
        write_step(temp.path(), "b.sh", "exit 5");
        write_step(temp.path(), "c.sh", "touch c-ran");
        let mut config = config_with_steps(&["a.sh", "b.sh", "c.sh"]);
        config.stop_on_error = true;
        let (timer, waits) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        assert_eq!(report.status, RunStatus::Aborted { code: 5 });
        assert_eq!(report.status.exit_code(), 5);
        assert_eq!(report.records.len(), 2);
        assert!(!temp.path().join("c-ran").exists());

        // One delay after step a only; none after the aborting step.
        assert_eq!(waits.lock().unwrap().len(), 1);
    }

    #[test]
    #[cfg(unix)]
    fn missing_step_aborts_before_anything_runs() {
        let temp = TempDir::new().unwrap();
        write_step(temp.path(), "real.sh", "touch real-ran");
        let config = config_with_steps(&["ghost.sh", "real.sh"]);
        let (timer, waits) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        assert_eq!(
            report.status,
            RunStatus::MissingSteps(vec!["ghost.sh".into()])
        );
        assert_eq!(report.status.exit_code(), 1);
        assert!(report.records.is_empty());
        assert!(!temp.path().join("real-ran").exists());
        assert!(waits.lock().unwrap().is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn skip_missing_runs_the_resolved_subset() {
        let temp = TempDir::new().unwrap();
        write_step(temp.path(), "real.sh", "exit 0");
        let mut config = config_with_steps(&["ghost.sh", "real.sh"]);
        config.skip_missing = true;
        let (timer, _) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        assert_eq!(report.status, RunStatus::Success);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].name, "real.sh");
    }

    #[test]
    fn skip_missing_with_nothing_resolvable_is_precondition_failure() {
        let temp = TempDir::new().unwrap();
        let mut config = config_with_steps(&["ghost.sh"]);
        config.skip_missing = true;
        let (timer, _) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        assert_eq!(report.status.exit_code(), 1);
        assert!(report.records.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn missing_watch_dir_does_not_affect_status() {
        let temp = TempDir::new().unwrap();
        write_step(temp.path(), "ok.sh", "exit 0");
        let mut config = config_with_steps(&["ok.sh"]);
        config.watch_dirs = vec![PathBuf::from("never-created")];
        let (timer, _) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        assert_eq!(report.status, RunStatus::Success);
    }

    #[test]
    #[cfg(unix)]
    fn missing_interpreter_records_launch_sentinel() {
        let temp = TempDir::new().unwrap();
        write_step(temp.path(), "step.sh", "exit 0");
        let mut config = config_with_steps(&["step.sh"]);
        config.interpreter = Some("no-such-interpreter".to_string());
        let (timer, _) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        assert_eq!(report.status, RunStatus::CompletedWithFailures);
        assert_eq!(report.failures[0].exit_code, 127);
    }

    #[test]
    #[cfg(unix)]
    fn relative_run_dir_resolves_against_project_root() {
        let temp = TempDir::new().unwrap();
        let work = temp.path().join("work");
        fs::create_dir_all(&work).unwrap();
        write_step(temp.path(), "cwd.sh", "pwd > where.txt");
        let mut config = config_with_steps(&["cwd.sh"]);
        config.run_dir = Some(PathBuf::from("work"));
        let (timer, _) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        assert_eq!(report.status, RunStatus::Success);
        // Step resolved from the project root but executed inside work/.
        let reported = fs::read_to_string(work.join("where.txt")).unwrap();
        assert_eq!(
            fs::canonicalize(reported.trim()).unwrap(),
            fs::canonicalize(&work).unwrap()
        );
    }

    #[test]
    #[cfg(unix)]
    fn report_preserves_captured_output() {
        let temp = TempDir::new().unwrap();
        write_step(temp.path(), "noisy.sh", "echo out-line\necho err-line >&2");
        let config = config_with_steps(&["noisy.sh"]);
        let (timer, _) = recording_timer();

        let report = Pipeline::with_timer(&config, temp.path(), timer).run();

        let record = &report.records[0];
        assert!(record.result.stdout.contains("out-line"));
        assert!(record.result.stderr.contains("err-line"));
    }
}
