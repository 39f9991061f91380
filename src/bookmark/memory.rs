//! In-memory bookmark store

use super::traits::{BookmarkStore, StorageResult};
use super::types::{Bookmark, NewBookmark};
use chrono::Utc;
use dashmap::DashMap;

/// Volatile store for tests and for hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryBookmarkStore {
    bookmarks: DashMap<String, Bookmark>,
}

impl MemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookmarkStore for MemoryBookmarkStore {
    fn save(&self, bookmark: &NewBookmark) -> StorageResult<String> {
        let stored = bookmark.clone().into_bookmark(Utc::now());
        let id = stored.id.clone();
        self.bookmarks.insert(id.clone(), stored);
        Ok(id)
    }

    fn list(&self) -> StorageResult<Vec<Bookmark>> {
        let mut all: Vec<Bookmark> = self.bookmarks.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(all)
    }

    fn delete(&self, id: &str) -> StorageResult<bool> {
        Ok(self.bookmarks.remove(id).is_some())
    }

    fn clear(&self) -> StorageResult<usize> {
        let removed = self.bookmarks.len();
        self.bookmarks.clear();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_bookmark(text: &str) -> NewBookmark {
        NewBookmark {
            title: text.to_string(),
            site: "Claude".to_string(),
            chat_id: Some("c1".to_string()),
            prompt_index: 0,
            url: "https://claude.ai/chat/c1".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn save_list_delete() {
        let store = MemoryBookmarkStore::new();
        let id = store.save(&new_bookmark("one")).unwrap();
        store.save(&new_bookmark("two")).unwrap();

        assert_eq!(store.list().unwrap().len(), 2);
        assert!(store.delete(&id).unwrap());
        assert!(!store.delete(&id).unwrap());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn clear_reports_count() {
        let store = MemoryBookmarkStore::new();
        store.save(&new_bookmark("a")).unwrap();
        store.save(&new_bookmark("b")).unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.list().unwrap().is_empty());
    }
}
