//! Repository layer: the note store and its error contract.
//!
//! # Responsibility
//! - Own the authoritative in-memory note collection.
//! - Isolate serialization and storage details from callers.
//!
//! # Invariants
//! - No component other than `NoteStore` mutates the collection.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`) in
//!   addition to storage transport errors.

pub mod note_store;
