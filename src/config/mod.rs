//! Configuration loading and schema.
//!
//! - [`schema`] - Serde struct definitions for `datarun.yml`
//! - [`loader`] - File discovery and parsing

pub mod loader;
pub mod schema;

pub use loader::{config_path, load_config, CONFIG_FILE_NAME};
pub use schema::RunnerConfig;
