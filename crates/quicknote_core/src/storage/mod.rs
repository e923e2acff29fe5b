//! Persistence backends for the note snapshot slot.
//!
//! # Responsibility
//! - Define the named-slot contract the store persists through.
//! - Provide file, SQLite and in-memory implementations.
//!
//! # Invariants
//! - `read` of a never-written slot is `Ok(None)`, not an error.
//! - `write` replaces the whole slot value (last write wins).

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;
mod memory;
mod sqlite;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend failure while reading or writing a slot.
#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Db(DbError),
    /// Backend refused the operation (quota, injected failure, ...).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage io failure at `{}`: {source}", path.display())
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named-slot text storage, the analogue of browser `localStorage`.
pub trait NoteStorage {
    /// Reads one slot; `None` when it was never written.
    fn read(&self, slot: &str) -> StorageResult<Option<String>>;
    /// Replaces one slot value.
    fn write(&mut self, slot: &str, value: &str) -> StorageResult<()>;
    /// Short backend name used in log events.
    fn backend_name(&self) -> &'static str;
}
