//! Parse-and-summarize step routines.
//!
//! Each submodule reads one input format from the fetched-data directory and
//! writes a small plain-text report into the processed directory:
//!
//! - [`csv`] - numeric summary of one column
//! - [`json`] - record counts grouped by a field
//! - [`text`] - line/word/character counts and word frequencies

pub mod csv;
pub mod json;
pub mod text;
