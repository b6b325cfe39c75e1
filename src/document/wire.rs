//! Wire-level helpers for fields the schema does not name.
//!
//! Presentations saved by newer editors carry fields this crate never
//! models. Messages that must survive a rebuild keep them in an
//! [`UnknownFields`] set, captured on decode and written back after the
//! modeled fields, so a rebuild changes only what it sets.

use prost::bytes::{Buf, BufMut};
use prost::encoding::{self, DecodeContext, WireType};
use prost::{DecodeError, Message};

use crate::error::Result;

/// One field value as it appeared on the wire.
#[derive(Clone, Debug, PartialEq)]
pub enum UnknownValue {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    LengthDelimited(Vec<u8>),
    Group(UnknownFields),
}

/// Fields read but not modeled, in the order they were read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnknownFields {
    fields: Vec<(u32, UnknownValue)>,
}

impl UnknownFields {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Every value recorded under `tag`.
    pub fn get(&self, tag: u32) -> impl Iterator<Item = &UnknownValue> {
        self.fields
            .iter()
            .filter(move |(t, _)| *t == tag)
            .map(|(_, value)| value)
    }

    pub fn push(&mut self, tag: u32, value: UnknownValue) {
        self.fields.push((tag, value));
    }
}

impl Message for UnknownFields {
    fn encode_raw(&self, buf: &mut impl BufMut) {
        for (tag, value) in &self.fields {
            match value {
                UnknownValue::Varint(v) => encoding::uint64::encode(*tag, v, buf),
                UnknownValue::Fixed64(v) => encoding::fixed64::encode(*tag, v, buf),
                UnknownValue::Fixed32(v) => encoding::fixed32::encode(*tag, v, buf),
                UnknownValue::LengthDelimited(v) => encoding::bytes::encode(*tag, v, buf),
                UnknownValue::Group(group) => encoding::group::encode(*tag, group, buf),
            }
        }
    }

    fn merge_field(
        &mut self,
        tag: u32,
        wire_type: WireType,
        buf: &mut impl Buf,
        ctx: DecodeContext,
    ) -> std::result::Result<(), DecodeError> {
        let value = match wire_type {
            WireType::Varint => {
                let mut v = 0;
                encoding::uint64::merge(wire_type, &mut v, buf, ctx)?;
                UnknownValue::Varint(v)
            }
            WireType::SixtyFourBit => {
                let mut v = 0;
                encoding::fixed64::merge(wire_type, &mut v, buf, ctx)?;
                UnknownValue::Fixed64(v)
            }
            WireType::ThirtyTwoBit => {
                let mut v = 0;
                encoding::fixed32::merge(wire_type, &mut v, buf, ctx)?;
                UnknownValue::Fixed32(v)
            }
            WireType::LengthDelimited => {
                let mut v = Vec::new();
                encoding::bytes::merge(wire_type, &mut v, buf, ctx)?;
                UnknownValue::LengthDelimited(v)
            }
            WireType::StartGroup => {
                let mut group = UnknownFields::default();
                encoding::group::merge(tag, wire_type, &mut group, buf, ctx)?;
                UnknownValue::Group(group)
            }
            // A stray end-group marker is malformed; skip_field reports it.
            WireType::EndGroup => return encoding::skip_field(wire_type, tag, buf, ctx),
        };
        self.fields.push((tag, value));
        Ok(())
    }

    fn encoded_len(&self) -> usize {
        self.fields
            .iter()
            .map(|(tag, value)| match value {
                UnknownValue::Varint(v) => encoding::uint64::encoded_len(*tag, v),
                UnknownValue::Fixed64(v) => encoding::fixed64::encoded_len(*tag, v),
                UnknownValue::Fixed32(v) => encoding::fixed32::encoded_len(*tag, v),
                UnknownValue::LengthDelimited(v) => encoding::bytes::encoded_len(*tag, v),
                UnknownValue::Group(group) => encoding::group::encoded_len(*tag, group),
            })
            .sum()
    }

    fn clear(&mut self) {
        self.fields.clear();
    }
}

/// Split an encoded message into `(tag, record)` pairs, where each record
/// is the field's key and payload exactly as encoded.
pub fn records(message: &[u8]) -> Result<Vec<(u32, &[u8])>> {
    let mut out = Vec::new();
    let mut rest = message;
    while !rest.is_empty() {
        let start = rest;
        let (tag, wire_type) = encoding::decode_key(&mut rest)?;
        encoding::skip_field(wire_type, tag, &mut rest, DecodeContext::default())?;
        out.push((tag, &start[..start.len() - rest.len()]));
    }
    Ok(out)
}

/// Replace every occurrence of string field `tag` with `value`, leaving all
/// other records byte-for-byte as they were.
///
/// The new record takes the place of the first old one, or goes last when
/// the field was absent. An empty `value` removes the field.
pub fn replace_string_field(message: &[u8], tag: u32, value: &str) -> Result<Vec<u8>> {
    let mut replacement = Vec::new();
    if !value.is_empty() {
        encoding::string::encode(tag, &value.to_string(), &mut replacement);
    }

    let mut out = Vec::with_capacity(message.len() + replacement.len());
    let mut placed = false;
    for (field, record) in records(message)? {
        if field != tag {
            out.extend_from_slice(record);
        } else if !placed {
            out.extend_from_slice(&replacement);
            placed = true;
        }
    }
    if !placed {
        out.extend_from_slice(&replacement);
    }
    Ok(out)
}
