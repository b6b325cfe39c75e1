//! The presentation document schema.
//!
//! A presentation is a protobuf message: a header (application info, name,
//! category, notes), the flat list of [`Cue`]s, the [`CueGroup`]s that name
//! and color runs of cues, and the [`Arrangement`]s that order groups for
//! playback. Content types use `prost` derives. [`Presentation`] and the
//! header messages it carries keep every field they do not model (edit
//! timestamps, music key, CCLI artwork, ...) and write it back unchanged.
//!
//! ```
//! use cuebuild::document::Presentation;
//!
//! let mut doc = Presentation::default();
//! doc.name = "Amazing Grace".into();
//! let bytes = doc.to_bytes();
//! assert_eq!(Presentation::from_bytes(&bytes).unwrap().name, "Amazing Grace");
//! ```

pub mod action;
pub mod basic;
mod cue;
pub mod media;
pub mod slide;
pub mod wire;

use prost::bytes::{Buf, BufMut};
use prost::encoding::{self, DecodeContext, WireType};
use prost::{DecodeError, Message};

use crate::error::Result;

pub use action::{Action, ActionData, ActionType};
pub use basic::{ApplicationInfo, Color, CollectionElement, Platform, Url, Uuid};
pub use cue::{CompletionActionType, Cue};
pub use slide::PresentationSlide;
pub use wire::{UnknownFields, UnknownValue};

/// Field number of the operator notes in an encoded presentation.
pub const NOTES_TAG: u32 = 7;

type DecodeResult = std::result::Result<(), DecodeError>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Presentation {
    pub application_info: Option<ApplicationInfo>,
    pub uuid: Option<Uuid>,
    pub name: String,
    pub category: String,
    pub notes: String,
    pub background: Option<Background>,
    pub chord_chart: Option<Url>,
    pub selected_arrangement: Option<Uuid>,
    pub arrangements: Vec<Arrangement>,
    pub cue_groups: Vec<CueGroup>,
    pub cues: Vec<Cue>,
    pub ccli: Option<Ccli>,
    pub timeline: Option<Timeline>,
    pub unknown_fields: UnknownFields,
}

impl Presentation {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::decode(bytes)?)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Document uuid, empty when unset.
    pub fn uuid_str(&self) -> &str {
        self.uuid.as_ref().map_or("", |u| u.string.as_str())
    }

    /// Drop every cue, group, and arrangement.
    pub fn clear_content(&mut self) {
        self.cues.clear();
        self.cue_groups.clear();
        self.arrangements.clear();
        self.selected_arrangement = None;
    }

    pub fn cue(&self, uuid: &str) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.uuid_str() == uuid)
    }

    pub fn group(&self, uuid: &str) -> Option<&CueGroup> {
        self.cue_groups.iter().find(|group| group.uuid_str() == uuid)
    }

    pub fn selected_arrangement(&self) -> Option<&Arrangement> {
        let selected = self.selected_arrangement.as_ref()?;
        self.arrangements
            .iter()
            .find(|arrangement| arrangement.uuid.as_ref() == Some(selected))
    }
}

impl Message for Presentation {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if let Some(info) = &self.application_info {
            encoding::message::encode(1, info, buf);
        }
        if let Some(uuid) = &self.uuid {
            encoding::message::encode(2, uuid, buf);
        }
        if !self.name.is_empty() {
            encoding::string::encode(3, &self.name, buf);
        }
        if !self.category.is_empty() {
            encoding::string::encode(6, &self.category, buf);
        }
        if !self.notes.is_empty() {
            encoding::string::encode(NOTES_TAG, &self.notes, buf);
        }
        if let Some(background) = &self.background {
            encoding::message::encode(8, background, buf);
        }
        if let Some(url) = &self.chord_chart {
            encoding::message::encode(9, url, buf);
        }
        if let Some(selected) = &self.selected_arrangement {
            encoding::message::encode(10, selected, buf);
        }
        encoding::message::encode_repeated(11, &self.arrangements, buf);
        encoding::message::encode_repeated(12, &self.cue_groups, buf);
        encoding::message::encode_repeated(13, &self.cues, buf);
        if let Some(ccli) = &self.ccli {
            encoding::message::encode(14, ccli, buf);
        }
        if let Some(timeline) = &self.timeline {
            encoding::message::encode(17, timeline, buf);
        }
        self.unknown_fields.encode_raw(buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> DecodeResult {
        match tag {
            1 => encoding::message::merge(
                wire_type,
                self.application_info.get_or_insert_with(Default::default),
                buf,
                ctx,
            ),
            2 => encoding::message::merge(
                wire_type,
                self.uuid.get_or_insert_with(Default::default),
                buf,
                ctx,
            ),
            3 => encoding::string::merge(wire_type, &mut self.name, buf, ctx),
            6 => encoding::string::merge(wire_type, &mut self.category, buf, ctx),
            NOTES_TAG => encoding::string::merge(wire_type, &mut self.notes, buf, ctx),
            8 => encoding::message::merge(
                wire_type,
                self.background.get_or_insert_with(Default::default),
                buf,
                ctx,
            ),
            9 => encoding::message::merge(
                wire_type,
                self.chord_chart.get_or_insert_with(Default::default),
                buf,
                ctx,
            ),
            10 => encoding::message::merge(
                wire_type,
                self.selected_arrangement.get_or_insert_with(Default::default),
                buf,
                ctx,
            ),
            11 => encoding::message::merge_repeated(wire_type, &mut self.arrangements, buf, ctx),
            12 => encoding::message::merge_repeated(wire_type, &mut self.cue_groups, buf, ctx),
            13 => encoding::message::merge_repeated(wire_type, &mut self.cues, buf, ctx),
            14 => encoding::message::merge(
                wire_type,
                self.ccli.get_or_insert_with(Default::default),
                buf,
                ctx,
            ),
            17 => encoding::message::merge(
                wire_type,
                self.timeline.get_or_insert_with(Default::default),
                buf,
                ctx,
            ),
            _ => self.unknown_fields.merge_field(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        self.application_info
            .as_ref()
            .map_or(0, |info| encoding::message::encoded_len(1, info))
            + self.uuid.as_ref().map_or(0, |uuid| encoding::message::encoded_len(2, uuid))
            + string_len(3, &self.name)
            + string_len(6, &self.category)
            + string_len(NOTES_TAG, &self.notes)
            + self
                .background
                .as_ref()
                .map_or(0, |background| encoding::message::encoded_len(8, background))
            + self.chord_chart.as_ref().map_or(0, |url| encoding::message::encoded_len(9, url))
            + self
                .selected_arrangement
                .as_ref()
                .map_or(0, |selected| encoding::message::encoded_len(10, selected))
            + encoding::message::encoded_len_repeated(11, &self.arrangements)
            + encoding::message::encoded_len_repeated(12, &self.cue_groups)
            + encoding::message::encoded_len_repeated(13, &self.cues)
            + self.ccli.as_ref().map_or(0, |ccli| encoding::message::encoded_len(14, ccli))
            + self
                .timeline
                .as_ref()
                .map_or(0, |timeline| encoding::message::encoded_len(17, timeline))
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

fn string_len(tag: u32, value: &String) -> usize {
    if value.is_empty() {
        0
    } else {
        encoding::string::encoded_len(tag, value)
    }
}

/// A named, colored run of cues.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CueGroup {
    #[prost(message, optional, tag = "1")]
    pub group: Option<Group>,
    #[prost(message, repeated, tag = "2")]
    pub cue_identifiers: Vec<Uuid>,
}

impl CueGroup {
    pub fn uuid_str(&self) -> &str {
        self.group
            .as_ref()
            .and_then(|g| g.uuid.as_ref())
            .map_or("", |u| u.string.as_str())
    }

    pub fn name(&self) -> &str {
        self.group.as_ref().map_or("", |g| g.name.as_str())
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Group {
    #[prost(message, optional, tag = "1")]
    pub uuid: Option<Uuid>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(message, optional, tag = "3")]
    pub color: Option<Color>,
    #[prost(message, optional, tag = "5")]
    pub application_group_identifier: Option<Uuid>,
    #[prost(string, tag = "6")]
    pub application_group_name: String,
}

/// A named playback order of groups.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Arrangement {
    #[prost(message, optional, tag = "1")]
    pub uuid: Option<Uuid>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(message, repeated, tag = "3")]
    pub group_identifiers: Vec<Uuid>,
}

/// Identity and operator notes of a presentation, decoded without its
/// content. Reads documents whose cues this schema cannot describe.
#[derive(Clone, PartialEq, prost::Message)]
pub struct DocumentHeader {
    #[prost(message, optional, tag = "2")]
    pub uuid: Option<Uuid>,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(string, tag = "7")]
    pub notes: String,
}

impl DocumentHeader {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::decode(bytes)?)
    }

    pub fn uuid_str(&self) -> &str {
        self.uuid.as_ref().map_or("", |u| u.string.as_str())
    }
}

/// `encoded` with its operator notes set to `notes`. Every other field
/// keeps its exact bytes.
pub fn rewrite_notes(encoded: &[u8], notes: &str) -> Result<Vec<u8>> {
    wire::replace_string_field(encoded, NOTES_TAG, notes)
}

/// Slide background of the document. Only the fill color is modeled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Background {
    pub color: Option<Color>,
    pub unknown_fields: UnknownFields,
}

impl Message for Background {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if let Some(color) = &self.color {
            encoding::message::encode(1, color, buf);
        }
        self.unknown_fields.encode_raw(buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> DecodeResult {
        match tag {
            1 => encoding::message::merge(
                wire_type,
                self.color.get_or_insert_with(Default::default),
                buf,
                ctx,
            ),
            _ => self.unknown_fields.merge_field(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        self.color.as_ref().map_or(0, |color| encoding::message::encoded_len(1, color))
            + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Song credits shown on the CCLI line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ccli {
    pub author: String,
    pub artist_credits: String,
    pub song_title: String,
    pub publisher: String,
    pub copyright_year: u32,
    pub song_number: u32,
    pub display: bool,
    pub unknown_fields: UnknownFields,
}

impl Message for Ccli {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        for (tag, value) in self.strings() {
            if !value.is_empty() {
                encoding::string::encode(tag, value, buf);
            }
        }
        if self.copyright_year != 0 {
            encoding::uint32::encode(5, &self.copyright_year, buf);
        }
        if self.song_number != 0 {
            encoding::uint32::encode(6, &self.song_number, buf);
        }
        if self.display {
            encoding::bool::encode(7, &self.display, buf);
        }
        self.unknown_fields.encode_raw(buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> DecodeResult {
        match tag {
            1 => encoding::string::merge(wire_type, &mut self.author, buf, ctx),
            2 => encoding::string::merge(wire_type, &mut self.artist_credits, buf, ctx),
            3 => encoding::string::merge(wire_type, &mut self.song_title, buf, ctx),
            4 => encoding::string::merge(wire_type, &mut self.publisher, buf, ctx),
            5 => encoding::uint32::merge(wire_type, &mut self.copyright_year, buf, ctx),
            6 => encoding::uint32::merge(wire_type, &mut self.song_number, buf, ctx),
            7 => encoding::bool::merge(wire_type, &mut self.display, buf, ctx),
            _ => self.unknown_fields.merge_field(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let strings: usize = self.strings().map(|(tag, value)| string_len(tag, value)).sum();
        let year = match self.copyright_year {
            0 => 0,
            year => encoding::uint32::encoded_len(5, &year),
        };
        let number = match self.song_number {
            0 => 0,
            number => encoding::uint32::encoded_len(6, &number),
        };
        let display = if self.display {
            encoding::bool::encoded_len(7, &self.display)
        } else {
            0
        };
        strings + year + number + display + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Ccli {
    fn strings(&self) -> impl Iterator<Item = (u32, &String)> {
        [
            (1, &self.author),
            (2, &self.artist_credits),
            (3, &self.song_title),
            (4, &self.publisher),
        ]
        .into_iter()
    }
}

/// Document timeline. Only the total duration is modeled; recorded timeline
/// cues ride along in `unknown_fields`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    pub duration: f64,
    pub unknown_fields: UnknownFields,
}

impl Message for Timeline {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        if self.duration != 0.0 {
            encoding::double::encode(5, &self.duration, buf);
        }
        self.unknown_fields.encode_raw(buf);
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> DecodeResult {
        match tag {
            5 => encoding::double::merge(wire_type, &mut self.duration, buf, ctx),
            _ => self.unknown_fields.merge_field(tag, wire_type, buf, ctx),
        }
    }

    fn encoded_len(&self) -> usize {
        let duration = if self.duration != 0.0 {
            encoding::double::encoded_len(5, &self.duration)
        } else {
            0
        };
        duration + self.unknown_fields.encoded_len()
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}
