//! Launching an external viewer on a written flamegraph.

use crate::utils::config::DEFAULT_VIEWER_COMMAND;
use crate::utils::error::ViewerError;
use log::debug;
use std::path::Path;
use std::process::Command;

/// Something that can display a speedscope file
///
/// The generator only talks to this trait, so tests and library users can
/// swap in their own implementation instead of spawning a process.
pub trait Viewer {
    fn open(&self, path: &Path) -> Result<(), ViewerError>;
}

/// Runs an external command with the profile path appended
///
/// Defaults to `npx speedscope <path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedscopeViewer {
    program: String,
    args: Vec<String>,
}

impl Default for SpeedscopeViewer {
    fn default() -> Self {
        let (program, args) = DEFAULT_VIEWER_COMMAND
            .split_first()
            .map(|(program, args)| {
                (
                    program.to_string(),
                    args.iter().map(|a| a.to_string()).collect(),
                )
            })
            .unwrap_or_default();

        Self { program, args }
    }
}

impl SpeedscopeViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewer from a whitespace-separated command line, e.g. `"npx speedscope"`
    pub fn from_command_line(command: &str) -> Result<Self, ViewerError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ViewerError::EmptyCommand)?;

        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Viewer for SpeedscopeViewer {
    fn open(&self, path: &Path) -> Result<(), ViewerError> {
        if self.program.is_empty() {
            return Err(ViewerError::EmptyCommand);
        }

        let command = self.display_command();
        debug!("Running viewer: {} {}", command, path.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| ViewerError::LaunchFailed {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ViewerError::ExitStatus {
                command,
                status: status.to_string(),
            });
        }

        Ok(())
    }
}
