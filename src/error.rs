//! Error types for datarun operations.
//!
//! This module defines [`DatarunError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `DatarunError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `DatarunError::Other`) for unexpected errors
//! - A failing *step* is never an error of the runner itself: step outcomes
//!   are reported through the pipeline's run report, not through this type

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for datarun operations.
#[derive(Debug, Error)]
pub enum DatarunError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A download failed (HTTP status or transport error).
    #[error("Fetch failed for {url}: {message}")]
    FetchFailed { url: String, message: String },

    /// An input file could not be interpreted by a process routine.
    #[error("Invalid data in {path}: {message}")]
    InvalidData { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for datarun operations.
pub type Result<T> = std::result::Result<T, DatarunError>;
