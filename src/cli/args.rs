//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Datarun - Sequential batch runner for data fetch/process pipelines.
#[derive(Debug, Parser)]
#[command(name = "datarun")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default datarun.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Minimal output (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the configured pipeline (default if no command specified)
    Run(RunArgs),

    /// Download a dataset and save it locally
    Fetch(FetchArgs),

    /// Summarize a previously fetched dataset
    Process(ProcessArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Override the configured delay between steps (seconds)
    #[arg(long, value_name = "SECS")]
    pub delay: Option<u64>,

    /// Stop at the first failing step
    #[arg(long)]
    pub stop_on_error: bool,
}

/// Arguments for the `fetch` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FetchArgs {
    /// URL to download
    #[arg(long)]
    pub url: String,

    /// Directory to save into (created if needed)
    #[arg(long, default_value = "data")]
    pub dir: PathBuf,

    /// Output file name
    #[arg(long = "out", value_name = "FILE")]
    pub filename: String,
}

/// Arguments for the `process` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ProcessArgs {
    #[command(subcommand)]
    pub format: ProcessFormat,
}

/// Input format and per-format options for `process`.
#[derive(Debug, Clone, Subcommand)]
pub enum ProcessFormat {
    /// Numeric summary (count/min/max/mean/median) of one CSV column
    Csv {
        /// CSV file to read
        #[arg(long)]
        input: PathBuf,

        /// Header name of the column to summarize
        #[arg(long)]
        column: String,

        /// Report file to write
        #[arg(long)]
        output: PathBuf,
    },

    /// Count JSON records grouped by a field
    Json {
        /// JSON file to read
        #[arg(long)]
        input: PathBuf,

        /// Field to group records by
        #[arg(long = "group-by", value_name = "FIELD")]
        group_by: String,

        /// Report file to write
        #[arg(long)]
        output: PathBuf,
    },

    /// Line, word, and word-frequency statistics of a text file
    Text {
        /// Text file to read
        #[arg(long)]
        input: PathBuf,

        /// Report file to write
        #[arg(long)]
        output: PathBuf,

        /// Number of most frequent words to include
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
