//! Convert command implementation.
//!
//! The convert command:
//! 1. Reads recorded events from the input file
//! 2. Validates and adds each event to a generator
//! 3. Writes the speedscope document
//! 4. Optionally opens it in a viewer

use super::models::ConvertArgs;
use crate::flamegraph::{FlamegraphConfig, FlamegraphGenerator};
use crate::output::{SpeedscopeViewer, Viewer};
use crate::parser::read_events;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// Builds the viewer from `args.viewer` when `args.open` is set.
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let viewer = if args.open {
        let viewer = match &args.viewer {
            Some(command) => SpeedscopeViewer::from_command_line(command)
                .context("Invalid viewer command")?,
            None => SpeedscopeViewer::new(),
        };
        Some(viewer)
    } else {
        None
    };

    execute_convert_with(&args, viewer.as_ref().map(|v| v as &dyn Viewer))
}

/// Execute the convert command with a caller-supplied viewer
///
/// **Public** - lets tests run the full pipeline without launching a process
///
/// # Errors
/// * Input file cannot be read or parsed
/// * An event record fails validation (the error names its index)
/// * Output file cannot be written, or the viewer fails
pub fn execute_convert_with(args: &ConvertArgs, viewer: Option<&dyn Viewer>) -> Result<()> {
    let start_time = Instant::now();

    info!("Converting events from: {}", args.input.display());

    // Step 1: Read events
    info!("Step 1/3: Reading events...");
    let records = read_events(&args.input)
        .with_context(|| format!("Failed to read events from {}", args.input.display()))?;

    // Step 2: Add events
    info!("Step 2/3: Validating {} events...", records.len());
    let config = FlamegraphConfig::new()
        .with_name(args.name.clone())
        .with_unit(args.unit.clone());
    let mut generator = FlamegraphGenerator::with_config(config);

    for (index, record) in records.iter().enumerate() {
        if let Err(err) = generator.add_event_value(record) {
            let context = match err.field() {
                Some(field) => format!("Invalid event at index {} (field `{}`)", index, field),
                None => format!("Invalid event at index {}", index),
            };
            return Err(anyhow::Error::new(err).context(context));
        }
    }
    debug!("Accepted {} events", generator.event_count());

    // Step 3: Write (and open)
    info!("Step 3/3: Writing flamegraph...");
    generator
        .save(&args.output, viewer)
        .context("Failed to save flamegraph")?;

    info!("✓ Flamegraph written to: {}", args.output.display());

    let elapsed = start_time.elapsed();
    info!("Convert completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if let Some(command) = &args.viewer {
        if command.trim().is_empty() {
            anyhow::bail!("Viewer command cannot be empty");
        }
    }

    Ok(())
}
