//! Download-and-save step routine.
//!
//! Fetches a dataset over HTTP and writes it under a target directory,
//! creating the directory as needed. This is the built-in counterpart of a
//! pipeline acquisition step: it does not validate the payload, it only
//! moves bytes and reports success or failure through its exit status.

use crate::error::{DatarunError, Result};
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Fetches datasets over HTTP/HTTPS.
pub struct DataFetcher {
    client: Client,
}

impl DataFetcher {
    /// Create a fetcher with the default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("datarun")
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Fetch the body of a URL as text.
    pub fn fetch_text(&self, url: &str) -> Result<String> {
        info!("Fetching data from {url}...");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DatarunError::FetchFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DatarunError::FetchFailed {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        response.text().map_err(|e| DatarunError::FetchFailed {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch a URL and write the body to `dir/filename`.
    ///
    /// Returns the path written. The directory is created if it does not
    /// exist yet.
    pub fn download(&self, url: &str, dir: &Path, filename: &str) -> Result<PathBuf> {
        let body = self.fetch_text(url)?;
        let path = write_data(dir, filename, &body)?;
        info!("SUCCESS: data fetched and saved as {}", path.display());
        Ok(path)
    }
}

impl Default for DataFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Write string data under a directory, creating the directory first.
pub fn write_data(dir: &Path, filename: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(filename);
    fs::create_dir_all(dir)?;
    fs::write(&path, contents)?;
    info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(path)
}
