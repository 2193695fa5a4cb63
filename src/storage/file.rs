//! File-backed key-value storage.
//!
//! All keys live in one JSON object file (`{"key": "value", ...}`). Every
//! write rewrites the whole file through a synced temp file and an atomic
//! rename so a crash mid-write never leaves a truncated file behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{KeyValueStorage, StorageError};
use crate::config::xdg;

/// Key-value storage persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Creates storage backed by the file at `path`.
    ///
    /// The file and its parent directory are created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let write_err = |source: std::io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                xdg::ensure_dir(parent).map_err(write_err)?;
            }
        }
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| write_err(std::io::Error::new(ErrorKind::InvalidData, e)))?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "storage.json".to_string());
        let temp_path = self.path.with_file_name(format!("{file_name}.tmp"));
        let mut temp = fs::File::create(&temp_path).map_err(write_err)?;
        temp.write_all(json.as_bytes()).map_err(write_err)?;
        temp.sync_all().map_err(write_err)?;
        drop(temp);
        fs::rename(&temp_path, &self.path).map_err(write_err)?;
        Ok(())
    }

    /// Reads the current map for a write, starting over if the file is corrupt.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_map() {
            Ok(map) => Ok(map),
            Err(StorageError::Corrupt { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "overwriting corrupt storage file");
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_in(dir: &tempfile::TempDir) -> FileStorage {
        FileStorage::new(dir.path().join("storage.json"))
    }

    #[test]
    fn get_missing_file_returns_none() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = storage_in(&dir);
        assert_eq!(storage.get_item("k").expect("read"), None);
    }

    #[test]
    fn set_then_get_returns_value() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = storage_in(&dir);
        storage.set_item("k", "v1").expect("write");
        assert_eq!(storage.get_item("k").expect("read").as_deref(), Some("v1"));
    }

    #[test]
    fn set_preserves_other_keys() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = storage_in(&dir);
        storage.set_item("a", "1").expect("write a");
        storage.set_item("b", "2").expect("write b");
        assert_eq!(storage.get_item("a").expect("read").as_deref(), Some("1"));
        assert_eq!(storage.get_item("b").expect("read").as_deref(), Some("2"));
    }

    #[test]
    fn value_survives_new_instance() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        storage_in(&dir).set_item("k", "persisted").expect("write");
        let reopened = storage_in(&dir);
        assert_eq!(
            reopened.get_item("k").expect("read").as_deref(),
            Some("persisted")
        );
    }

    #[test]
    fn write_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path().join("nested/deeper/storage.json"));
        storage.set_item("k", "v").expect("write");
        assert!(storage.path().exists());
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = storage_in(&dir);
        storage.set_item("k", "v").expect("write");
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn overwrite_replaces_whole_file_contents() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = storage_in(&dir);
        storage.set_item("k", &"x".repeat(4096)).expect("long write");
        storage.set_item("k", "short").expect("short write");
        let raw = fs::read_to_string(storage.path()).expect("read file");
        let map: BTreeMap<String, String> = serde_json::from_str(&raw).expect("valid JSON");
        assert_eq!(map.get("k").map(String::as_str), Some("short"));
        assert!(!dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_fails_read() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = storage_in(&dir);
        fs::write(storage.path(), "{not json").expect("write corrupt file");
        match storage.get_item("k") {
            Err(StorageError::Corrupt { .. }) => {}
            other => panic!("expected Corrupt, got: {other:?}"),
        }
    }

    #[test]
    fn corrupt_file_is_replaced_on_write() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = storage_in(&dir);
        fs::write(storage.path(), "{not json").expect("write corrupt file");
        storage.set_item("k", "fresh").expect("write over corrupt file");
        assert_eq!(storage.get_item("k").expect("read").as_deref(), Some("fresh"));
    }

    #[test]
    fn directory_path_fails_read_with_read_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = FileStorage::new(dir.path());
        match storage.get_item("k") {
            Err(StorageError::Read { .. }) => {}
            other => panic!("expected Read error, got: {other:?}"),
        }
    }

    #[test]
    fn empty_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let storage = storage_in(&dir);
        fs::write(storage.path(), "").expect("write empty file");
        assert_eq!(storage.get_item("k").expect("read"), None);
    }
}
