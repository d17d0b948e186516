//! Evented flamegraph generation in the speedscope file format.
//!
//! This module converts labeled start/finish intervals into a speedscope
//! document with a shared frame table and one evented profile.

pub mod event;
pub mod generator;
pub mod schema;

// Re-export main types
pub use event::{Event, SourceLocation, Timestamp};
pub use generator::{FlamegraphConfig, FlamegraphGenerator};
pub use schema::{
    EventedProfile, Frame, ProfileType, Shared, SpeedscopeFile, TimelineEvent, TimelineEventKind,
};
