//! Evented flamegraph generation.
//!
//! Accumulates labeled intervals and turns them into a speedscope evented
//! profile: names are deduplicated into an indexed frame table, intervals
//! become open/close markers, and every time is made relative to the
//! earliest start.

use super::event::{Event, SourceLocation, Timestamp};
use super::schema::{EventedProfile, Frame, ProfileType, SpeedscopeFile, TimelineEvent};
use crate::output::json::write_profile;
use crate::output::viewer::Viewer;
use crate::utils::config::{DEFAULT_PROFILE_NAME, DEFAULT_PROFILE_UNIT};
use crate::utils::error::{SaveError, ValidationError};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Flamegraph configuration
///
/// Both values are passed through verbatim into the generated profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlamegraphConfig {
    pub name: String,
    pub unit: String,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            unit: DEFAULT_PROFILE_UNIT.to_string(),
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

/// Accumulates events and produces speedscope documents
///
/// The event list only grows; `generate` reads it without modifying it, so
/// repeated calls return identical documents. Not synchronized: hosts that
/// add events from several threads must wrap the generator in a mutex.
#[derive(Debug, Clone, Default)]
pub struct FlamegraphGenerator {
    config: FlamegraphConfig,
    events: Vec<Event>,
}

impl FlamegraphGenerator {
    /// Generator with the default name and unit
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FlamegraphConfig) -> Self {
        Self {
            config,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &FlamegraphConfig {
        &self.config
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Record an interval without source location
    pub fn add_event(
        &mut self,
        name: impl Into<String>,
        start: impl Into<Timestamp>,
        finish: impl Into<Timestamp>,
    ) -> Result<(), ValidationError> {
        self.add_event_at(name, start, finish, SourceLocation::new())
    }

    /// Record an interval with source location
    ///
    /// # Errors
    /// * `ValidationError::MissingName` - name is empty
    /// * `ValidationError::NonFinite` - start or finish is NaN or infinite
    pub fn add_event_at(
        &mut self,
        name: impl Into<String>,
        start: impl Into<Timestamp>,
        finish: impl Into<Timestamp>,
        location: SourceLocation,
    ) -> Result<(), ValidationError> {
        let event = Event::new(name, start, finish, location)?;
        self.events.push(event);
        Ok(())
    }

    /// Record an interval given as a loosely typed JSON object
    ///
    /// See [`Event::from_value`] for the accepted keys.
    pub fn add_event_value(&mut self, value: &Value) -> Result<(), ValidationError> {
        let event = Event::from_value(value)?;
        self.events.push(event);
        Ok(())
    }

    /// Build the speedscope document for all events recorded so far
    ///
    /// # Algorithm
    /// 1. Stable sort events by `(start, finish)`
    /// 2. Assign frame indices in order of first occurrence per name
    /// 3. Emit an open and a close marker per event, relative to the earliest start
    /// 4. Stable sort all markers by relative time
    pub fn generate(&self) -> SpeedscopeFile {
        let mut sorted: Vec<&Event> = self.events.iter().collect();
        sorted.sort_by(|a, b| (a.start, a.finish).cmp(&(b.start, b.finish)));

        let Some(first) = sorted.first() else {
            debug!("No events recorded, generating empty flamegraph");
            return SpeedscopeFile::new(Vec::new(), Vec::new());
        };

        let base = first.start;
        // The last event in sort order need not finish last.
        let finish_max = sorted
            .iter()
            .map(|event| event.finish)
            .fold(first.finish, Timestamp::max);

        let (frames, frame_indices) = build_frames(&sorted);

        let mut timeline = Vec::with_capacity(sorted.len() * 2);
        for (event, &frame) in sorted.iter().zip(&frame_indices) {
            timeline.push(TimelineEvent::open(frame, event.start - base));
            timeline.push(TimelineEvent::close(frame, event.finish - base));
        }
        timeline.sort_by(|a, b| a.at.cmp(&b.at));

        debug!(
            "Generated {} frames and {} timeline events from {} events",
            frames.len(),
            timeline.len(),
            sorted.len()
        );

        let profile = EventedProfile {
            profile_type: ProfileType::Evented,
            name: self.config.name.clone(),
            unit: self.config.unit.clone(),
            start_value: Timestamp::ZERO,
            end_value: finish_max - base,
            events: timeline,
        };

        SpeedscopeFile::new(frames, vec![profile])
    }

    /// Generate, write the document to `path`, and optionally open it
    ///
    /// # Errors
    /// * `SaveError::Output` - the document could not be written
    /// * `SaveError::Viewer` - the viewer failed to launch or exited with an error
    pub fn save(&self, path: impl AsRef<Path>, viewer: Option<&dyn Viewer>) -> Result<(), SaveError> {
        let path = path.as_ref();
        let document = self.generate();
        if document.is_empty() {
            warn!("No events recorded, writing an empty flamegraph");
        }

        write_profile(&document, path)?;

        if let Some(viewer) = viewer {
            info!("Opening flamegraph: {}", path.display());
            viewer.open(path)?;
        }

        Ok(())
    }
}

/// Deduplicate names into frames, returning the frame index for each event
///
/// Location metadata comes from the first occurrence of each name.
fn build_frames(sorted: &[&Event]) -> (Vec<Frame>, Vec<usize>) {
    let mut frames: Vec<Frame> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    let frame_indices = sorted
        .iter()
        .map(|event| {
            *index_by_name.entry(event.name.as_str()).or_insert_with(|| {
                let index = frames.len();
                frames.push(Frame {
                    name: event.name.clone(),
                    file: event.location.file.clone(),
                    line: event.location.line,
                    col: event.location.col,
                    index,
                });
                index
            })
        })
        .collect();

    (frames, frame_indices)
}
