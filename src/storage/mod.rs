//! Durable key-value storage for client-side dashboard state.
//!
//! The [`KeyValueStorage`] trait is the seam between the layout store and
//! whatever keeps data across sessions. Values are opaque strings; callers
//! own their serialization format.
//!
//! Two implementations are provided:
//! - [`FileStorage`]: a single JSON object file, written atomically.
//! - [`MemoryStorage`]: process-local map for ephemeral sessions and tests.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by storage backends.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing file exists but could not be read.
    #[error("Failed to read storage file: {path}")]
    Read {
        /// Storage file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be written or renamed into place.
    #[error("Failed to write storage file: {path}")]
    Write {
        /// Storage file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of string values.
    #[error("Storage file is corrupt: {path}")]
    Corrupt {
        /// Storage file path.
        path: PathBuf,
        /// JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store that survives across sessions.
///
/// Implementations must be usable from a spawned task, hence `Send + Sync`.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
