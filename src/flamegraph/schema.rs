//! Speedscope file format definitions for evented profiles.
//!
//! This module defines the structure of the JSON documents we write to disk.
//! Only the subset of the speedscope format needed for evented profiles is
//! modeled; optional frame fields are omitted entirely when absent.

use super::event::Timestamp;
use crate::utils::config::{SPEEDSCOPE_FORMAT_VERSION, SPEEDSCOPE_SCHEMA_URL};
use serde::{Deserialize, Serialize};

/// Top-level speedscope document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedscopeFile {
    #[serde(rename = "$schema")]
    pub schema: String,

    pub version: String,

    pub shared: Shared,

    /// At most one evented profile; empty when no events were recorded
    pub profiles: Vec<EventedProfile>,
}

impl SpeedscopeFile {
    /// Document with the fixed schema URL and format version
    pub fn new(frames: Vec<Frame>, profiles: Vec<EventedProfile>) -> Self {
        Self {
            schema: SPEEDSCOPE_SCHEMA_URL.to_string(),
            version: SPEEDSCOPE_FORMAT_VERSION.to_string(),
            shared: Shared { frames },
            profiles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Data shared between all profiles in a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shared {
    pub frames: Vec<Frame>,
}

/// One distinct event name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,

    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileType {
    #[serde(rename = "evented")]
    Evented,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventedProfile {
    #[serde(rename = "type")]
    pub profile_type: ProfileType,

    pub name: String,

    pub unit: String,

    #[serde(rename = "startValue")]
    pub start_value: Timestamp,

    #[serde(rename = "endValue")]
    pub end_value: Timestamp,

    pub events: Vec<TimelineEvent>,
}

/// Open or close marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineEventKind {
    #[serde(rename = "O")]
    Open,
    #[serde(rename = "C")]
    Close,
}

/// A frame opening or closing at a profile-relative time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(rename = "type")]
    pub kind: TimelineEventKind,

    pub frame: usize,

    pub at: Timestamp,
}

impl TimelineEvent {
    pub fn open(frame: usize, at: Timestamp) -> Self {
        Self {
            kind: TimelineEventKind::Open,
            frame,
            at,
        }
    }

    pub fn close(frame: usize, at: Timestamp) -> Self {
        Self {
            kind: TimelineEventKind::Close,
            frame,
            at,
        }
    }
}
