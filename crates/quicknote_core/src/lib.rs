//! Core domain logic for QuickNote.
//! This crate is the single source of truth for note invariants; rendering
//! layers only receive plain data back.

pub mod clock;
pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod storage;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{decode_notes, encode_notes, CodecError, DecodeReport};
pub use config::{ConfigError, CoreConfig, IdStrategy};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteId, NoteValidationError};
pub use repo::note_store::{NoteStore, StoreError, StoreResult};
pub use search::{
    bucket_start, filter_by_date, filter_by_date_at, search, DateBucket, NoteQuery, QueryError,
};
pub use storage::{
    FileStorage, MemoryStorage, NoteStorage, SqliteStorage, StorageError, StorageResult,
};
pub use view::{format_timestamp, render_views, NoteView};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
