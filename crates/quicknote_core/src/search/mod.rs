//! Note query engine.
//!
//! # Responsibility
//! - Filter note snapshots by free text and creation-date bucket.
//! - Stay pure: queries never touch the store or storage.
//!
//! # Invariants
//! - Combined queries run text search first, then the date bucket.
//! - Every stage preserves input order.

pub mod date_bucket;
pub mod text;

use crate::clock::Clock;
use crate::model::note::Note;
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

pub use date_bucket::{bucket_start, filter_by_date_at, DateBucket, QueryError};
pub use text::search;

/// Filters by date bucket in the machine's local zone at the clock's `now`.
pub fn filter_by_date(notes: &[Note], bucket: DateBucket, clock: &impl Clock) -> Vec<Note> {
    let now = clock.now().with_timezone(&Local);
    filter_by_date_at(notes, bucket, &now)
}

/// Combined search + date bucket query as issued by the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteQuery {
    pub term: String,
    pub bucket: DateBucket,
}

impl NoteQuery {
    pub fn new(term: impl Into<String>, bucket: DateBucket) -> Self {
        Self {
            term: term.into(),
            bucket,
        }
    }

    /// Runs `filter_by_date(search(notes, term), bucket)` at a pinned `now`.
    pub fn apply_at<Tz: TimeZone>(&self, notes: &[Note], now: &DateTime<Tz>) -> Vec<Note> {
        let matched = search(notes, &self.term);
        filter_by_date_at(&matched, self.bucket, now)
    }

    /// Runs the query in the local zone at the clock's `now`.
    pub fn apply(&self, notes: &[Note], clock: &impl Clock) -> Vec<Note> {
        let now = clock.now().with_timezone(&Local);
        self.apply_at(notes, &now)
    }
}
