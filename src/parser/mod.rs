//! Event input parsing.
//!
//! This module handles reading recorded events from JSON files before
//! they are fed into a flamegraph generator.

pub mod input;

// Re-export main functions
pub use input::{parse_events, read_events};
