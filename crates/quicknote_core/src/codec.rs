//! Snapshot serialization boundary.
//!
//! # Responsibility
//! - Encode the full note collection into the persisted JSON text.
//! - Decode persisted text back into validated notes.
//!
//! # Invariants
//! - Encoded output is a JSON array in collection order.
//! - Decoding never yields a note that violates `Note::validate()`.
//! - A single malformed record is dropped; it does not discard its siblings.

use crate::model::note::Note;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot-level decode failure.
#[derive(Debug)]
pub enum CodecError {
    /// Text is not valid JSON, or encoding failed.
    Json(serde_json::Error),
    /// Text is valid JSON but not an array of notes.
    NotAnArray,
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid notes snapshot: {err}"),
            Self::NotAnArray => write!(f, "invalid notes snapshot: expected a JSON array"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::NotAnArray => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Decode outcome with the count of records that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub notes: Vec<Note>,
    pub dropped: usize,
}

/// Serializes the whole collection.
pub fn encode_notes(notes: &[Note]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(notes)?)
}

/// Parses a persisted snapshot.
///
/// `null` is accepted as an empty collection.
pub fn decode_notes(text: &str) -> Result<DecodeReport, CodecError> {
    let items = match serde_json::from_str::<Value>(text)? {
        Value::Null => return Ok(DecodeReport::default()),
        Value::Array(items) => items,
        _ => return Err(CodecError::NotAnArray),
    };

    let mut report = DecodeReport::default();
    for item in items {
        match serde_json::from_value::<Note>(item) {
            Ok(note) => report.notes.push(note),
            Err(_) => report.dropped += 1,
        }
    }
    Ok(report)
}
