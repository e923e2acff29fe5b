//! Domain model for the note widget.
//!
//! # Responsibility
//! - Define the canonical note record shared by store, query and view code.
//!
//! # Invariants
//! - Every note is identified by an opaque `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
