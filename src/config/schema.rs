//! Configuration schema definitions for datarun.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format (`datarun.yml`).

use crate::error::{DatarunError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure for datarun.yml.
///
/// The whole pipeline is defined here before a run starts; nothing is
/// reconfigured mid-run. Relative `run_dir` is resolved against the project
/// root, relative `watch_dirs` against the run directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Ordered list of step names to execute (filename-like tokens).
    pub steps: Vec<String>,

    /// Delay in seconds between consecutive steps.
    #[serde(default = "default_delay")]
    pub delay_seconds: u64,

    /// Stop immediately when a step fails (non-zero exit code).
    #[serde(default, skip_serializing_if = "is_false")]
    pub stop_on_error: bool,

    /// Log and skip steps that cannot be resolved instead of aborting.
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip_missing: bool,

    /// Directory the steps are executed from. Defaults to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_dir: Option<PathBuf>,

    /// Interpreter to launch steps with (e.g. `python3`). When unset, the
    /// resolved step path is executed directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Extra command-line arguments per step name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra_args: HashMap<String, Vec<String>>,

    /// Directories listed after each step for operator visibility.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub watch_dirs: Vec<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            delay_seconds: default_delay(),
            stop_on_error: false,
            skip_missing: false,
            run_dir: None,
            interpreter: None,
            extra_args: HashMap::new(),
            watch_dirs: Vec::new(),
        }
    }
}

fn default_delay() -> u64 {
    10
}

fn is_false(v: &bool) -> bool {
    !v
}

impl RunnerConfig {
    /// Validate the configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(DatarunError::ConfigValidationError {
                message: "steps list is empty".to_string(),
            });
        }
        if self.steps.iter().any(|s| s.trim().is_empty()) {
            return Err(DatarunError::ConfigValidationError {
                message: "steps list contains an empty name".to_string(),
            });
        }
        if let Some(unknown) = self
            .extra_args
            .keys()
            .find(|k| !self.steps.iter().any(|s| s == *k))
        {
            return Err(DatarunError::ConfigValidationError {
                message: format!("extra_args refers to unknown step '{unknown}'"),
            });
        }
        Ok(())
    }

    /// Extra arguments configured for a step, empty if none.
    pub fn args_for(&self, step: &str) -> &[String] {
        self.extra_args
            .get(step)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
