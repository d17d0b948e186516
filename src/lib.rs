//! Speedscope Flamegraph
//!
//! Converts labeled start/finish events into speedscope evented profiles
//! that can be opened in a flamegraph viewer.
//!
//! ## Getting Started
//!
//! ```
//! use speedscope_flamegraph::flamegraph::FlamegraphGenerator;
//!
//! let mut generator = FlamegraphGenerator::new();
//! generator.add_event("request", 100, 200).unwrap();
//! generator.add_event("db_query", 115, 140).unwrap();
//!
//! let document = generator.generate();
//! assert_eq!(document.shared.frames.len(), 2);
//! ```
//!
//! The `speedscope-flamegraph` CLI wraps the same pipeline for JSON event files.

pub mod commands;
pub mod flamegraph;
pub mod output;
pub mod parser;
pub mod utils;
