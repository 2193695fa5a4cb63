//! In-memory key-value storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{KeyValueStorage, StorageError};

/// Process-local storage. Nothing survives the process.
///
/// Test builds can make reads and writes fail on demand and count successful
/// writes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-populated with one entry. Does not count as a write.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Number of successful `set_item` calls so far.
    #[cfg(test)]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes subsequent reads fail (or succeed again).
    #[cfg(test)]
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent writes fail (or succeed again).
    #[cfg(test)]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Reads a value directly, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.peek(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.items
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").expect("read"), None);
        storage.set_item("k", "v").expect("write");
        assert_eq!(storage.get_item("k").expect("read").as_deref(), Some("v"));
    }

    #[test]
    fn with_item_does_not_count_as_write() {
        let storage = MemoryStorage::with_item("k", "v");
        assert_eq!(storage.write_count(), 0);
        assert_eq!(storage.peek("k").as_deref(), Some("v"));
    }

    #[test]
    fn write_count_tracks_successful_writes_only() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "1").expect("write");
        storage.set_fail_writes(true);
        assert!(storage.set_item("k", "2").is_err());
        assert_eq!(storage.write_count(), 1);
        assert_eq!(storage.peek("k").as_deref(), Some("1"));
    }

    #[test]
    fn failing_reads_return_unavailable() {
        let storage = MemoryStorage::with_item("k", "v");
        storage.set_fail_reads(true);
        assert!(matches!(
            storage.get_item("k"),
            Err(StorageError::Unavailable(_))
        ));
        storage.set_fail_reads(false);
        assert!(storage.get_item("k").is_ok());
    }
}
