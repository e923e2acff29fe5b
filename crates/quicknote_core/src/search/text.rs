//! Free-text note search.
//!
//! # Invariants
//! - Matching is a case-insensitive substring test on title or content.
//! - Output order equals input order.
//! - A blank term is the identity transform.

use crate::model::note::Note;

/// Returns notes whose title or content contains `term`, ignoring case.
pub fn search(notes: &[Note], term: &str) -> Vec<Note> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return notes.to_vec();
    }

    notes
        .iter()
        .filter(|note| matches_term(note, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be trimmed and lower-cased.
pub(crate) fn matches_term(note: &Note, needle: &str) -> bool {
    note.title.to_lowercase().contains(needle) || note.content.to_lowercase().contains(needle)
}
