//! Step location resolution.
//!
//! Maps the configured step names to concrete file locations before anything
//! executes. Each name is looked up in the run directory first, then in the
//! project root, matching the layout where step scripts may sit either next
//! to the data they operate on or at the top of the repository.

use std::path::{Path, PathBuf};

/// A step whose location has been confirmed to exist.
#[derive(Debug, Clone)]
pub struct ResolvedStep {
    /// Step name as configured.
    pub name: String,

    /// Absolute path of the file to execute.
    pub path: PathBuf,

    /// Directory the step will be executed from.
    pub run_dir: PathBuf,
}

/// Outcome of resolving the full step list.
#[derive(Debug, Default)]
pub struct Resolution {
    /// Steps found in either location, in pipeline order.
    pub resolved: Vec<ResolvedStep>,

    /// Names found in neither location, in configuration order.
    pub missing: Vec<String>,
}

impl Resolution {
    /// True when every configured name was found.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Resolve step names against the run directory, then the project root.
///
/// Pipeline order is preserved in `resolved`; unresolvable names are
/// collected in `missing` for the caller to report in one consolidated
/// message. Deciding whether missing names abort the run belongs to the
/// pipeline, not here.
pub fn resolve_steps(names: &[String], run_dir: &Path, project_root: &Path) -> Resolution {
    let mut resolution = Resolution::default();

    for name in names {
        let preferred = run_dir.join(name);
        let fallback = project_root.join(name);

        let path = if preferred.is_file() {
            Some(preferred)
        } else if fallback.is_file() {
            Some(fallback)
        } else {
            None
        };

        match path {
            Some(path) => resolution.resolved.push(ResolvedStep {
                name: name.clone(),
                path,
                run_dir: run_dir.to_path_buf(),
            }),
            None => resolution.missing.push(name.clone()),
        }
    }

    resolution
}
