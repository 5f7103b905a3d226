//! Configuration file discovery and loading.
//!
//! The pipeline configuration lives in a single `datarun.yml` at the project
//! root. An explicit path (from `--config`) takes priority over discovery.

use crate::config::schema::RunnerConfig;
use crate::error::{DatarunError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "datarun.yml";

/// Locate the configuration file for the given project root.
///
/// Returns the explicit path unchanged when one is given, otherwise
/// `<project_root>/datarun.yml`. Existence is checked at load time.
pub fn config_path(project_root: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => project_root.join(CONFIG_FILE_NAME),
    }
}

/// Load and parse the configuration file.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<RunnerConfig> {
    let path = config_path(project_root, explicit);

    if !path.exists() {
        return Err(DatarunError::ConfigNotFound { path });
    }

    let contents = fs::read_to_string(&path).map_err(|e| DatarunError::ConfigParseError {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let config: RunnerConfig =
        serde_yaml::from_str(&contents).map_err(|e| DatarunError::ConfigParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}
