//! Saved prompts
//!
//! Bookmarks are plain records: the prompt text plus where it came from.
//! Detection never writes here; callers build a `NewBookmark` from a
//! detected prompt and hand it to a `BookmarkStore`.

mod memory;
mod sqlite;
mod traits;
mod types;

pub use memory::MemoryBookmarkStore;
pub use sqlite::SqliteBookmarkStore;
pub use traits::{BookmarkStore, OpenBookmarkStore, StorageError, StorageResult};
pub use types::{filter_bookmarks, relative_date, Bookmark, NewBookmark};
