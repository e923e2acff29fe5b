use chrono::{Duration, TimeZone, Utc};
use quicknote_core::db::migrations::latest_version;
use quicknote_core::db::{open_db, open_db_in_memory, DbError};
use quicknote_core::{
    FileStorage, ManualClock, NoteStorage, NoteStore, SqliteStorage, StorageError, StoreError,
};
use rusqlite::Connection;

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap())
}

#[test]
fn open_db_in_memory_creates_slots_table() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'slots');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn opening_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = SqliteStorage::open(&path).err().unwrap();
    assert!(matches!(err, StorageError::Db(_)));
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quicknote.db");
    let clock = clock();

    let created = {
        let storage = SqliteStorage::open(&path).unwrap();
        let mut store = NoteStore::open(storage, clock.clone());
        let first = store.add("first", "one").unwrap();
        clock.advance(Duration::seconds(1));
        store.add("second", "two").unwrap();
        store.remove(&first.id).unwrap();
        store.get_all().to_vec()
    };

    let reopened = NoteStore::open(SqliteStorage::open(&path).unwrap(), clock);
    assert_eq!(reopened.get_all(), created.as_slice());
    assert_eq!(schema_version(reopened.storage().connection()), latest_version());
}

#[test]
fn file_store_survives_reopen_and_writes_plain_json() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();

    let mut store = NoteStore::open(FileStorage::new(dir.path()), clock.clone());
    let note = store.add("Trip", "pack socks").unwrap();
    clock.advance(Duration::minutes(1));
    store.update(&note.id, "Trip", "pack socks and boots").unwrap();

    let raw = std::fs::read_to_string(dir.path().join("notes.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["content"], "pack socks and boots");

    let reopened = NoteStore::open(FileStorage::new(dir.path()), clock);
    assert_eq!(reopened.get_all(), store.get_all());
}

#[test]
fn file_store_recovers_from_corrupt_slot_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.json"), "<html>oops</html>").unwrap();

    let mut store = NoteStore::open(FileStorage::new(dir.path()), clock());
    assert!(store.is_empty());

    store.add("fresh", "start").unwrap();
    assert_eq!(
        FileStorage::new(dir.path())
            .read("notes")
            .unwrap()
            .map(|text| text.contains("fresh")),
        Some(true)
    );
}

#[test]
fn file_write_failure_surfaces_as_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file in the way").unwrap();

    let mut store = NoteStore::open(FileStorage::new(&blocker), clock());
    let err = store.add("a", "b").unwrap_err();
    assert!(matches!(err, StoreError::Persistence(StorageError::Io { .. })));
    assert_eq!(store.len(), 1);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
