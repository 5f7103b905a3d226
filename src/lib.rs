//! Datarun - sequential batch runner for data pipelines.
//!
//! Datarun executes a fixed, ordered list of data-acquisition and
//! data-processing steps as isolated child processes, with a timed delay
//! between steps, structured logging of every lifecycle event, and a
//! best-effort listing of watched directories after each step. Steps are
//! opaque: the only contract they must honor is their exit status (0 means
//! success).
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Built-in download-and-save step routine
//! - [`process`] - Built-in parse-and-summarize step routines
//! - [`runner`] - Step resolution, execution, inspection, and orchestration
//!
//! # Example
//!
//! ```no_run
//! use datarun::config::RunnerConfig;
//! use datarun::runner::Pipeline;
//! use std::path::Path;
//!
//! let config = RunnerConfig {
//!     steps: vec!["get_data.sh".into(), "summarize.sh".into()],
//!     delay_seconds: 10,
//!     ..Default::default()
//! };
//! let report = Pipeline::new(&config, Path::new(".")).run();
//! std::process::exit(report.status.exit_code());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod process;
pub mod runner;

pub use error::{DatarunError, Result};
