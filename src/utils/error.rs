//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised when an event is rejected on insertion
///
/// The accumulated event list is never modified when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,

    #[error("{field} must be numeric")]
    NotNumeric { field: &'static str },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} has an invalid value")]
    InvalidLocation { field: &'static str },

    #[error("event record must be a JSON object")]
    NotAnObject,
}

impl ValidationError {
    /// Name of the offending field, if the error is tied to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingName => Some("name"),
            ValidationError::NotNumeric { field }
            | ValidationError::NonFinite { field }
            | ValidationError::InvalidLocation { field } => Some(*field),
            ValidationError::NotAnObject => None,
        }
    }
}

/// Errors that can occur while reading input event files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid event input format: {0}")]
    InvalidFormat(String),

    #[error("Failed to read input: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors reported by an external profile viewer
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Failed to launch viewer `{command}`: {source}")]
    LaunchFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Viewer `{command}` exited with status {status}")]
    ExitStatus { command: String, status: String },

    #[error("Viewer command is empty")]
    EmptyCommand,
}

/// Errors from saving a generated flamegraph
#[derive(Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),
}
