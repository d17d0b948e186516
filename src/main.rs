//! Speedscope Flamegraph CLI
//!
//! Converts recorded start/finish events into speedscope evented profiles
//! and optionally opens them in a viewer.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use speedscope_flamegraph::commands::{
    display_schema, display_version, execute_convert, validate_args, validate_profile_file,
    ConvertArgs,
};
use speedscope_flamegraph::utils::config::{
    DEFAULT_ARTIFACTS_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_PROFILE_NAME, DEFAULT_PROFILE_UNIT,
};

/// Speedscope Flamegraph - evented profiles from timed events
#[derive(Parser, Debug)]
#[command(name = "speedscope-flamegraph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an event file into a speedscope flamegraph
    Convert {
        /// Input events (JSON array or one JSON object per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the speedscope JSON (bare names are placed in artifacts/)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Profile display name
        #[arg(long, env = "FLAMEGRAPH_NAME", default_value = DEFAULT_PROFILE_NAME)]
        name: String,

        /// Time unit of the event timestamps
        #[arg(long, env = "FLAMEGRAPH_UNIT", default_value = DEFAULT_PROFILE_UNIT)]
        unit: String,

        /// Open the result in a viewer after writing
        #[arg(long)]
        open: bool,

        /// Viewer command line (defaults to "npx speedscope")
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Validate a speedscope JSON file
    Validate {
        /// Path to speedscope JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Convert {
            input,
            output,
            name,
            unit,
            open,
            viewer,
        } => {
            let args = ConvertArgs {
                input,
                output: resolve_output_path(output),
                name,
                unit,
                open,
                viewer,
            };

            validate_args(&args)?;
            execute_convert(args)?;
        }

        Commands::Validate { file } => {
            validate_profile_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Place bare output file names under artifacts/
fn resolve_output_path(output: PathBuf) -> PathBuf {
    if output
        .parent()
        .map(|p| p.as_os_str().is_empty())
        .unwrap_or(true)
    {
        PathBuf::from(DEFAULT_ARTIFACTS_DIR).join(output)
    } else {
        output
    }
}
