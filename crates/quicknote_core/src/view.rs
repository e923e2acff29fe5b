//! Presentation view model.
//!
//! # Responsibility
//! - Turn notes into plain display records for whatever renders them.
//! - Format `created_at`/`last_modified` consistently for display.
//!
//! # Invariants
//! - Both labels of one view are rendered in the same zone and format.

use crate::model::note::Note;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

/// Display pattern, e.g. `Oct 19, 2026, 14:05`.
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y, %H:%M";

/// Render-ready projection of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_label: String,
    pub modified_label: String,
    /// Edited after creation, even within the same displayed minute.
    pub edited: bool,
}

impl NoteView {
    pub fn from_note<Tz>(note: &Note, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            created_label: format_timestamp(&note.created_at, tz),
            modified_label: format_timestamp(&note.last_modified, tz),
            edited: note.last_modified > note.created_at,
        }
    }
}

/// Formats an instant as a human-readable date and time in `tz`.
pub fn format_timestamp<Tz>(value: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}

/// Projects a whole snapshot, preserving order.
pub fn render_views<Tz>(notes: &[Note], tz: &Tz) -> Vec<NoteView>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    notes.iter().map(|note| NoteView::from_note(note, tz)).collect()
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, NoteView};
    use crate::model::note::Note;
    use chrono::{Duration, FixedOffset, TimeZone, Utc};

    #[test]
    fn formats_in_requested_zone() {
        let instant = Utc.with_ymd_and_hms(2026, 10, 19, 12, 5, 0).unwrap();
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_timestamp(&instant, &tz), "Oct 19, 2026, 14:05");
        assert_eq!(format_timestamp(&instant, &Utc), "Oct 19, 2026, 12:05");
    }

    #[test]
    fn view_reports_edits() {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 0).unwrap();
        let mut note = Note::new("1", "t", "c", created).unwrap();
        assert!(!NoteView::from_note(&note, &Utc).edited);

        note.edit("t2", "c", created + Duration::hours(2)).unwrap();
        let view = NoteView::from_note(&note, &Utc);
        assert!(view.edited);
        assert_eq!(view.modified_label, "Jan 2, 2026, 05:04");
    }

    #[test]
    fn edit_within_the_same_minute_is_still_reported() {
        let created = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 0).unwrap();
        let mut note = Note::new("1", "t", "c", created).unwrap();
        note.edit("t", "c2", created + Duration::seconds(20)).unwrap();

        let view = NoteView::from_note(&note, &Utc);
        assert_eq!(view.created_label, view.modified_label);
        assert!(view.edited);
    }
}
