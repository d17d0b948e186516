//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod convert;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use convert::{execute_convert, execute_convert_with, validate_args};
pub use models::ConvertArgs;
pub use utils::{display_schema, display_version, validate_profile_file};
