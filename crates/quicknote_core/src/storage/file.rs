//! Directory-rooted JSON file backend.
//!
//! Slot `notes` lives at `<dir>/notes.json`. Writes go to a hidden temp file
//! next to the slot file first and are renamed into place, so readers only
//! ever see a complete snapshot.

use super::{NoteStorage, StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `slot`.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }

    /// Hidden sibling of the slot file, so the rename never crosses directories.
    fn temp_path(slot_path: &Path) -> PathBuf {
        let name = slot_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        slot_path.with_file_name(format!(".{name}.tmp"))
    }
}

impl NoteStorage for FileStorage {
    fn read(&self, slot: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write(&mut self, slot: &str, value: &str) -> StorageResult<()> {
        let target = self.slot_path(slot);
        let parent = target.parent().unwrap_or(&self.dir).to_path_buf();
        fs::create_dir_all(&parent).map_err(|source| StorageError::Io {
            path: parent,
            source,
        })?;

        let temp = Self::temp_path(&target);
        fs::write(&temp, value).map_err(|source| StorageError::Io {
            path: temp.clone(),
            source,
        })?;

        fs::rename(&temp, &target).map_err(|source| StorageError::Io {
            path: target,
            source,
        })
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::FileStorage;
    use crate::storage::NoteStorage;

    #[test]
    fn missing_slot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.read("notes").unwrap(), None);
    }

    #[test]
    fn write_creates_directory_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested");
        let mut storage = FileStorage::new(&root);

        storage.write("notes", "[]").unwrap();
        storage.write("notes", "[1]").unwrap();

        assert_eq!(storage.read("notes").unwrap().as_deref(), Some("[1]"));
        let names: Vec<String> = std::fs::read_dir(&root)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["notes.json".to_string()]);
    }

    #[test]
    fn nested_slot_writes_next_to_its_own_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.write("work/notes", "[]").unwrap();

        assert_eq!(storage.read("work/notes").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("work").join("notes.json").is_file());
        assert!(!dir.path().join("work").join(".notes.json.tmp").exists());
    }
}
