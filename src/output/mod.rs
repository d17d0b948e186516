//! Output writers and viewers for generated flamegraphs.
//!
//! This module handles:
//! - Writing speedscope JSON documents to disk
//! - Reading them back for validation
//! - Opening written files in an external viewer

pub mod json;
pub mod viewer;

// Re-export main functions
pub use json::{read_profile, write_profile};
pub use viewer::{SpeedscopeViewer, Viewer};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
