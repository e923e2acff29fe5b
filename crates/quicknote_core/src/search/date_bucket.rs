//! Creation-date bucket filtering.
//!
//! # Responsibility
//! - Map bucket names (`all|today|week|month`) to a start boundary.
//! - Keep notes whose `created_at` falls inside `[start, now]`.
//!
//! # Invariants
//! - Boundaries are local calendar midnights in the zone of `now`.
//! - Only `created_at` is inspected; edits never move a note between buckets.
//! - `All` is the identity transform.

use crate::model::note::Note;
use chrono::{DateTime, Days, Duration, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Named creation-date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateBucket {
    #[default]
    All,
    /// Since local midnight today.
    Today,
    /// Since local midnight seven days ago.
    Week,
    /// Since local midnight one calendar month ago.
    Month,
}

impl DateBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl Display for DateBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query input failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    UnknownBucket(String),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBucket(value) => write!(
                f,
                "unknown date bucket `{value}`; expected all|today|week|month"
            ),
        }
    }
}

impl Error for QueryError {}

impl FromStr for DateBucket {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(QueryError::UnknownBucket(other.to_string())),
        }
    }
}

/// Start of the bucket window relative to `now`, or `None` for `All`.
///
/// A calendar month back clamps to the last day of a shorter month
/// (March 31 -> February 28/29).
pub fn bucket_start<Tz: TimeZone>(bucket: DateBucket, now: &DateTime<Tz>) -> Option<DateTime<Utc>> {
    let today = now.date_naive();
    let start_day = match bucket {
        DateBucket::All => return None,
        DateBucket::Today => Some(today),
        DateBucket::Week => today.checked_sub_days(Days::new(7)),
        DateBucket::Month => today.checked_sub_months(Months::new(1)),
    };
    // Dates this far back only fail near NaiveDate::MIN; treat as unbounded.
    let start_day = start_day.unwrap_or(NaiveDate::MIN);
    Some(local_midnight(&now.timezone(), start_day))
}

/// Keeps notes created inside the bucket window ending at `now`.
pub fn filter_by_date_at<Tz: TimeZone>(
    notes: &[Note],
    bucket: DateBucket,
    now: &DateTime<Tz>,
) -> Vec<Note> {
    let Some(start) = bucket_start(bucket, now) else {
        return notes.to_vec();
    };
    let end = now.with_timezone(&Utc);

    notes
        .iter()
        .filter(|note| note.created_at >= start && note.created_at <= end)
        .cloned()
        .collect()
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_time(chrono::NaiveTime::MIN);
    resolve_local(tz, midnight)
        // Midnight skipped by a DST jump: the day starts an hour later.
        .or_else(|| resolve_local(tz, midnight + Duration::hours(1)))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, value: NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&value)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}
