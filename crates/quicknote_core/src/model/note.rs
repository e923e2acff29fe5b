//! Note domain model.
//!
//! # Responsibility
//! - Define the single persisted entity of the note widget.
//! - Validate title/content/timestamp invariants at construction and decode.
//!
//! # Invariants
//! - `title` and `content` are non-empty after trimming.
//! - `last_modified >= created_at`.
//! - `id` and `created_at` never change after creation.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque note identifier.
///
/// Kept as a type alias: ids are plain strings on the wire and the store
/// never interprets their shape.
pub type NoteId = String;

/// Validation failures for note fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty or whitespace only.
    EmptyTitle,
    /// Content is empty or whitespace only.
    EmptyContent,
    /// `last_modified` precedes `created_at`.
    ModifiedBeforeCreated {
        created_at: DateTime<Utc>,
        last_modified: DateTime<Utc>,
    },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title cannot be empty"),
            Self::EmptyContent => write!(f, "note content cannot be empty"),
            Self::ModifiedBeforeCreated {
                created_at,
                last_modified,
            } => write!(
                f,
                "lastModified ({}) must be >= createdAt ({})",
                format_iso(last_modified),
                format_iso(created_at)
            ),
        }
    }
}

impl Error for NoteValidationError {}

/// A user-authored title/content pair with creation and edit timestamps.
///
/// Serialized with camelCase keys (`createdAt`, `lastModified`) and
/// millisecond ISO-8601 timestamps to stay compatible with snapshots written
/// by the browser build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawNote")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(serialize_with = "serialize_iso")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_iso")]
    pub last_modified: DateTime<Utc>,
}

impl Note {
    /// Creates a fresh note stamped at `now`.
    ///
    /// Title and content are stored trimmed.
    ///
    /// # Errors
    /// - Returns `EmptyTitle`/`EmptyContent` when a field is blank.
    pub fn new(
        id: impl Into<NoteId>,
        title: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        let note = Self {
            id: id.into(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            created_at: now,
            last_modified: now,
        };
        note.validate()?;
        Ok(note)
    }

    /// Replaces title/content and bumps `last_modified`.
    ///
    /// `last_modified` never moves backwards, even if `now` does.
    /// The note is left untouched when validation fails.
    pub fn edit(
        &mut self,
        title: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<(), NoteValidationError> {
        let (title, content) = validate_fields(title, content)?;
        self.title = title.to_string();
        self.content = content.to_string();
        self.last_modified = now.max(self.last_modified);
        Ok(())
    }

    /// Validates all note invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_fields(&self.title, &self.content)?;
        if self.last_modified < self.created_at {
            return Err(NoteValidationError::ModifiedBeforeCreated {
                created_at: self.created_at,
                last_modified: self.last_modified,
            });
        }
        Ok(())
    }
}

/// Checks user-supplied title/content and returns the trimmed values.
pub fn validate_fields<'a>(
    title: &'a str,
    content: &'a str,
) -> Result<(&'a str, &'a str), NoteValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(NoteValidationError::EmptyContent);
    }
    Ok((title, content))
}

/// Renders a timestamp the way `Date.prototype.toISOString` does.
pub fn format_iso(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso(value))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNote {
    id: NoteId,
    title: String,
    content: String,
    #[serde(deserialize_with = "deserialize_iso")]
    created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_iso")]
    last_modified: DateTime<Utc>,
}

impl TryFrom<RawNote> for Note {
    type Error = NoteValidationError;

    fn try_from(raw: RawNote) -> Result<Self, Self::Error> {
        let note = Self {
            id: raw.id,
            title: raw.title,
            content: raw.content,
            created_at: raw.created_at,
            last_modified: raw.last_modified,
        };
        note.validate()?;
        Ok(note)
    }
}

fn deserialize_iso<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let text = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| serde::de::Error::custom(format!("invalid timestamp `{text}`: {err}")))
}
