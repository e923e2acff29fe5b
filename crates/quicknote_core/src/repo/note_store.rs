//! Note store: owner of the in-memory collection and its persistence.
//!
//! # Responsibility
//! - Mediate every note mutation (add/update/remove).
//! - Rewrite the full snapshot to storage after each mutation.
//! - Recover missing or corrupt snapshots as an empty collection.
//!
//! # Invariants
//! - Collection order is newest-created-first; `add` prepends.
//! - Validation failures happen before any mutation or write.
//! - A failed write never rolls back the in-memory change.
//! - Id uniqueness is whatever the configured `IdStrategy` provides; the
//!   store does not dedupe.

use crate::clock::{Clock, SystemClock};
use crate::codec::{decode_notes, encode_notes};
use crate::config::{CoreConfig, IdStrategy, DEFAULT_SLOT_NAME};
use crate::model::note::{validate_fields, Note, NoteId, NoteValidationError};
use crate::search::NoteQuery;
use crate::storage::{NoteStorage, StorageError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation failure.
#[derive(Debug)]
pub enum StoreError {
    /// Blank title or content; nothing was changed.
    Validation(NoteValidationError),
    /// Update target does not exist; nothing was changed.
    NotFound(NoteId),
    /// Snapshot write failed; the in-memory change is kept.
    Persistence(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Persistence(err) => write!(f, "failed to persist notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Persistence(value)
    }
}

/// Single-writer note repository over an injected storage backend.
pub struct NoteStore<S: NoteStorage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    slot: String,
    id_strategy: IdStrategy,
    notes: Vec<Note>,
}

impl<S: NoteStorage, C: Clock> NoteStore<S, C> {
    /// Creates an empty, not-yet-loaded store on the default slot.
    pub fn new(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            slot: DEFAULT_SLOT_NAME.to_string(),
            id_strategy: IdStrategy::default(),
            notes: Vec::new(),
        }
    }

    /// Creates an empty store using slot name and id strategy from `config`.
    pub fn with_config(storage: S, clock: C, config: &CoreConfig) -> Self {
        Self {
            slot: config.slot_name.clone(),
            id_strategy: config.id_strategy,
            ..Self::new(storage, clock)
        }
    }

    /// Creates a store and loads the persisted snapshot into it.
    pub fn open(storage: S, clock: C) -> Self {
        let mut store = Self::new(storage, clock);
        store.load();
        store
    }

    /// Replaces the in-memory collection with the persisted snapshot.
    ///
    /// Never fails: unreadable, missing or corrupt data loads as empty.
    pub fn load(&mut self) -> Vec<Note> {
        let started_at = Instant::now();
        let backend = self.storage.backend_name();
        self.notes = match self.storage.read(&self.slot) {
            Ok(None) => {
                info!(
                    "event=notes_load module=store status=empty backend={} slot={}",
                    backend, self.slot
                );
                Vec::new()
            }
            Ok(Some(text)) => match decode_notes(&text) {
                Ok(report) => {
                    if report.dropped > 0 {
                        warn!(
                            "event=notes_load module=store status=partial backend={} slot={} dropped={}",
                            backend, self.slot, report.dropped
                        );
                    }
                    info!(
                        "event=notes_load module=store status=ok backend={} slot={} count={} duration_ms={}",
                        backend,
                        self.slot,
                        report.notes.len(),
                        started_at.elapsed().as_millis()
                    );
                    report.notes
                }
                Err(err) => {
                    warn!(
                        "event=notes_load module=store status=recovered backend={} slot={} error_code=snapshot_corrupt error={}",
                        backend, self.slot, err
                    );
                    Vec::new()
                }
            },
            Err(err) => {
                error!(
                    "event=notes_load module=store status=recovered backend={} slot={} error_code=storage_read_failed error={}",
                    backend, self.slot, err
                );
                Vec::new()
            }
        };
        self.notes.clone()
    }

    /// Creates a note, prepends it and persists the collection.
    pub fn add(&mut self, title: &str, content: &str) -> StoreResult<Note> {
        let now = self.clock.now();
        let note = Note::new(self.id_strategy.next_id(now), title, content, now)
            .inspect_err(|err| reject("note_add", err))?;

        self.notes.insert(0, note.clone());
        info!(
            "event=note_add module=store status=ok note_id={} total={}",
            note.id,
            self.notes.len()
        );
        self.persist()?;
        Ok(note)
    }

    /// Replaces title/content of an existing note and persists.
    pub fn update(&mut self, id: &str, title: &str, content: &str) -> StoreResult<Note> {
        let Some(index) = self.position(id) else {
            info!("event=note_update module=store status=not_found note_id={id}");
            return Err(StoreError::NotFound(id.to_string()));
        };
        validate_fields(title, content).inspect_err(|err| reject("note_update", err))?;

        let now = self.clock.now();
        let note = &mut self.notes[index];
        note.edit(title, content, now)?;
        let updated = note.clone();

        info!(
            "event=note_update module=store status=ok note_id={}",
            updated.id
        );
        self.persist()?;
        Ok(updated)
    }

    /// Deletes a note if present and persists; absent ids are not an error.
    pub fn remove(&mut self, id: &str) -> StoreResult<()> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        info!(
            "event=note_remove module=store status=ok note_id={} removed={}",
            id,
            before - self.notes.len()
        );
        self.persist()
    }

    /// Current collection, newest-created-first.
    pub fn get_all(&self) -> &[Note] {
        &self.notes
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Runs a combined search/date query over the current collection.
    pub fn query(&self, query: &NoteQuery) -> Vec<Note> {
        query.apply(&self.notes, &self.clock)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable backend access, e.g. for injecting failures in tests.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn persist(&mut self) -> StoreResult<()> {
        let started_at = Instant::now();
        let backend = self.storage.backend_name();
        let snapshot = encode_notes(&self.notes).map_err(|err| {
            StorageError::Unavailable(format!("snapshot encoding failed: {err}"))
        })?;

        match self.storage.write(&self.slot, &snapshot) {
            Ok(()) => {
                debug!(
                    "event=notes_persist module=store status=ok backend={} slot={} count={} bytes={} duration_ms={}",
                    backend,
                    self.slot,
                    self.notes.len(),
                    snapshot.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=notes_persist module=store status=error backend={} slot={} error_code=storage_write_failed error={}",
                    backend, self.slot, err
                );
                Err(err.into())
            }
        }
    }
}

fn reject(event: &str, err: &NoteValidationError) {
    info!("event={event} module=store status=rejected reason={err}");
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, StoreError};
    use crate::clock::ManualClock;
    use crate::config::{CoreConfig, IdStrategy};
    use crate::storage::MemoryStorage;
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap())
    }

    #[test]
    fn add_uses_epoch_millis_id_by_default() {
        let mut store = NoteStore::new(MemoryStorage::new(), clock());
        let note = store.add("a", "b").unwrap();
        assert_eq!(
            note.id,
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0)
                .unwrap()
                .timestamp_millis()
                .to_string()
        );
    }

    #[test]
    fn config_selects_slot_and_uuid_ids() {
        let config = CoreConfig {
            slot_name: "work".to_string(),
            id_strategy: IdStrategy::Uuid,
            ..CoreConfig::default()
        };
        let mut store = NoteStore::with_config(MemoryStorage::new(), clock(), &config);
        let note = store.add("a", "b").unwrap();

        assert_eq!(note.id.len(), 36);
        assert!(store.storage().slot("work").is_some());
        assert!(store.storage().slot("notes").is_none());
    }

    #[test]
    fn update_validation_failure_writes_nothing() {
        let clock = clock();
        let mut store = NoteStore::new(MemoryStorage::new(), clock.clone());
        let note = store.add("a", "b").unwrap();
        clock.advance(Duration::seconds(1));

        let err = store.update(&note.id, "", "b").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(store.storage().write_count(), 1);
        assert_eq!(store.get_by_id(&note.id), Some(&note));
    }
}
