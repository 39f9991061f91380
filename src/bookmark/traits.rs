//! Storage trait definitions

use super::types::{Bookmark, NewBookmark};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Date parsing error: {0}")]
    DateParse(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for bookmark storage backends
///
/// Implementations must be thread-safe (Send + Sync); the message router
/// shares one store between callers.
pub trait BookmarkStore: Send + Sync {
    /// Persist a new bookmark and return its id
    fn save(&self, bookmark: &NewBookmark) -> StorageResult<String>;

    /// All bookmarks, newest first
    fn list(&self) -> StorageResult<Vec<Bookmark>>;

    /// Delete by id; false if no such bookmark
    fn delete(&self, id: &str) -> StorageResult<bool>;

    /// Delete everything, returning how many were removed
    fn clear(&self) -> StorageResult<usize> {
        let mut removed = 0;
        for bookmark in self.list()? {
            if self.delete(&bookmark.id)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Extension trait for opening stores from paths
pub trait OpenBookmarkStore: BookmarkStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
