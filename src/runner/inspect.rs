//! Post-step directory checks.
//!
//! After each step the runner lists the watched directories so an operator
//! can confirm expected files landed. This is purely observational: a
//! missing or unreadable directory is logged and ignored.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Maximum number of entry names shown per directory.
const PREVIEW_LIMIT: usize = 8;

/// Listing of one watched directory.
#[derive(Debug)]
pub struct DirSnapshot {
    /// Sorted entry names, at most [`PREVIEW_LIMIT`] of them.
    pub entries: Vec<String>,

    /// How many further entries were not included in the preview.
    pub truncated: usize,
}

impl DirSnapshot {
    /// Render the preview as `a, b, c (+2 more)`.
    pub fn preview(&self) -> String {
        let mut s = self.entries.join(", ");
        if self.truncated > 0 {
            s.push_str(&format!(" (+{} more)", self.truncated));
        }
        s
    }
}

/// Read a bounded, sorted listing of a directory.
pub fn snapshot(path: &Path) -> io::Result<DirSnapshot> {
    let mut names: Vec<String> = Vec::new();
    for entry in path.read_dir()? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();

    let truncated = names.len().saturating_sub(PREVIEW_LIMIT);
    names.truncate(PREVIEW_LIMIT);

    Ok(DirSnapshot {
        entries: names,
        truncated,
    })
}

/// Log a listing of every watched directory, best-effort.
///
/// Relative paths are resolved against the run directory. Never fails and
/// never influences the outcome of the run.
pub fn inspect_after_step(watch_dirs: &[PathBuf], run_dir: &Path) {
    for dir in watch_dirs {
        let path = if dir.is_absolute() {
            dir.clone()
        } else {
            run_dir.join(dir)
        };

        if !path.exists() {
            info!("[post-check] {} does not exist: {}", dir.display(), path.display());
            continue;
        }

        match snapshot(&path) {
            Ok(listing) => info!(
                "[post-check] {} => {} :: {}",
                dir.display(),
                path.display(),
                listing.preview()
            ),
            Err(err) => warn!(
                "[post-check] Could not list {} at {}: {}",
                dir.display(),
                path.display(),
                err
            ),
        }
    }
}
