use crate::output::read_profile;
use crate::utils::config::{SPEEDSCOPE_FORMAT_VERSION, SPEEDSCOPE_SCHEMA_URL};
use anyhow::Result;
use std::path::PathBuf;

/// Validate a speedscope JSON file
pub fn validate_profile_file(file_path: PathBuf) -> Result<()> {
    println!("Validating flamegraph: {}", file_path.display());

    let profile = read_profile(&file_path)?;

    println!("✓ Valid speedscope JSON");
    println!("  Version: {}", profile.version);
    println!("  Frames: {}", profile.shared.frames.len());
    println!("  Profiles: {}", profile.profiles.len());

    for p in &profile.profiles {
        println!("  Profile '{}' ({})", p.name, p.unit);
        println!("    Events: {}", p.events.len());
        println!("    End Value: {}", p.end_value);
    }

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Speedscope Evented Profile Schema");
    println!("Schema URL: {}", SPEEDSCOPE_SCHEMA_URL);
    println!("Format Version: {}", SPEEDSCOPE_FORMAT_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  $schema: string          - Speedscope schema URL");
        println!("  version: string          - Format version");
        println!("  shared.frames: array     - One frame per distinct event name");
        println!("    name: string           - Event name");
        println!("    file: string?          - Source file (first occurrence)");
        println!("    line: number?          - Source line (first occurrence)");
        println!("    col: number?           - Source column (first occurrence)");
        println!("    index: number          - Frame index");
        println!("  profiles: array          - Empty, or one evented profile");
        println!("    type: \"evented\"");
        println!("    name: string           - Profile display name");
        println!("    unit: string           - Time unit");
        println!("    startValue: number     - Always 0");
        println!("    endValue: number       - Latest finish minus earliest start");
        println!("    events: array          - Open/close markers sorted by time");
        println!("      type: \"O\" | \"C\"");
        println!("      frame: number        - Frame index");
        println!("      at: number           - Time relative to earliest start");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Speedscope Flamegraph v{}", env!("CARGO_PKG_VERSION"));
    println!("Speedscope Format: v{}", SPEEDSCOPE_FORMAT_VERSION);
    println!();
    println!("Converts labeled start/finish events into speedscope evented profiles.");
}
