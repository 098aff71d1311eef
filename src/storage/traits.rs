//! Storage traits and error types
//!
//! This module defines the trait interface for the two persistence
//! boundaries and their shared error type. Any error here is run-fatal.

use crate::storage::{ArticleRecord, SeenUrls};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Seen-set serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset {path} has unexpected columns: {found}")]
    Header { path: String, found: String },

    #[error("Failed to persist {path}: {message}")]
    Persist { path: String, message: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persisted set of processed URLs
///
/// Loaded once at run start and overwritten once at run end.
pub trait SeenStore {
    /// Loads the set; a store that was never written yields an empty set
    fn load(&self) -> StorageResult<SeenUrls>;

    /// Replaces the stored set with `seen`
    fn save(&self, seen: &SeenUrls) -> StorageResult<()>;
}

/// Append-only destination for article records
pub trait PostSink {
    /// Creates the dataset with its header if it does not exist yet
    fn ensure_initialized(&self) -> StorageResult<()>;

    /// Appends records after the existing rows, leaving those untouched
    fn append(&self, records: &[ArticleRecord]) -> StorageResult<()>;
}
