use crate::utils::config::{
    DEFAULT_ARTIFACTS_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_PROFILE_NAME, DEFAULT_PROFILE_UNIT,
};
use std::path::PathBuf;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Input file with recorded events (JSON array or one object per line)
    pub input: PathBuf,

    /// Output path for the speedscope JSON document
    pub output: PathBuf,

    /// Profile display name
    pub name: String,

    /// Time unit label
    pub unit: String,

    /// Open the written file in a viewer
    pub open: bool,

    /// Viewer command line (None = `npx speedscope`)
    pub viewer: Option<String>,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from(DEFAULT_ARTIFACTS_DIR).join(DEFAULT_OUTPUT_FILE),
            name: DEFAULT_PROFILE_NAME.to_string(),
            unit: DEFAULT_PROFILE_UNIT.to_string(),
            open: false,
            viewer: None,
        }
    }
}
