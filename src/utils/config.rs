//! Configuration and constants for the generator and CLI.

/// Speedscope file format schema URL written into every document
pub const SPEEDSCOPE_SCHEMA_URL: &str = "https://www.speedscope.app/file-format-schema.json";

/// Speedscope file format version
pub const SPEEDSCOPE_FORMAT_VERSION: &str = "0.0.1";

/// Default profile display name
pub const DEFAULT_PROFILE_NAME: &str = "flamegraph";

/// Default time unit label
pub const DEFAULT_PROFILE_UNIT: &str = "seconds";

// Viewer launched by `--open`, followed by the output path
pub const DEFAULT_VIEWER_COMMAND: &[&str] = &["npx", "speedscope"];

/// Directory that bare output file names are placed in by the CLI
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Output file name used when none is given
pub const DEFAULT_OUTPUT_FILE: &str = "flamegraph.json";

