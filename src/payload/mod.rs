//! JSON payloads that drive a rebuild.
//!
//! The payload is the only configuration surface for a run: content,
//! sequence, styling, and the side-effect settings of the synthetic cues.
//! Keys are camelCase; older key spellings are accepted through serde
//! aliases. Loosely-typed fields (colors, timer durations, sequence
//! numbers) are kept as [`serde_json::Value`] and coerced by the helpers in
//! [`values`], which fall back to defaults instead of rejecting the payload.
//! Lists skip entries of the wrong shape, and sizes and durations accept
//! numeric strings. A list field that is not a list at all is an error.

mod song;
mod transition;
pub mod values;

pub use song::{
    BackgroundMedia, ScreenAssignment, SectionPayload, SequenceEntry, SongPayload, StageLayout,
    TextStyle, TimerDescriptor,
};
pub use transition::{MediaDescriptor, PropDescriptor, TopicSpec, TransitionPayload};

use crate::error::Result;

/// Parse a song payload from JSON text.
pub fn parse_song(json: &str) -> Result<SongPayload> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a transition payload from JSON text.
pub fn parse_transition(json: &str) -> Result<TransitionPayload> {
    Ok(serde_json::from_str(json)?)
}
