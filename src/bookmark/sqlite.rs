//! SQLite storage backend for bookmarks

use super::traits::{BookmarkStore, OpenBookmarkStore, StorageError, StorageResult};
use super::types::{Bookmark, NewBookmark};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Mutex;

/// SQLite-backed bookmark store
///
/// One table, one row per bookmark. Thread-safe via internal mutex on the
/// connection.
pub struct SqliteBookmarkStore {
    conn: Mutex<Connection>,
}

impl SqliteBookmarkStore {
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS bookmarks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                site TEXT NOT NULL,
                chat_id TEXT,
                prompt_index INTEGER NOT NULL,
                url TEXT NOT NULL,
                text TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_bookmarks_timestamp
                ON bookmarks(timestamp);

            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn from_connection(conn: Connection) -> StorageResult<Self> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock only means another caller panicked mid-query;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Raw column values; the timestamp is parsed outside rusqlite's closure.
type BookmarkRow = (String, String, String, Option<String>, i64, String, String, String);

fn read_row(row: &Row<'_>) -> rusqlite::Result<BookmarkRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn into_bookmark(raw: BookmarkRow) -> StorageResult<Bookmark> {
    let (id, title, site, chat_id, prompt_index, url, text, timestamp) = raw;
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| StorageError::DateParse(format!("{}: {}", timestamp, e)))?
        .with_timezone(&Utc);
    Ok(Bookmark {
        id,
        title,
        site,
        chat_id,
        prompt_index: prompt_index.max(0) as usize,
        url,
        text,
        timestamp,
    })
}

impl OpenBookmarkStore for SqliteBookmarkStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::from_connection(Connection::open(path)?)
    }

    fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }
}

impl BookmarkStore for SqliteBookmarkStore {
    fn save(&self, bookmark: &NewBookmark) -> StorageResult<String> {
        let stored = bookmark.clone().into_bookmark(Utc::now());
        let conn = self.lock();
        conn.execute(
            "INSERT INTO bookmarks (id, title, site, chat_id, prompt_index, url, text, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                stored.id,
                stored.title,
                stored.site,
                stored.chat_id,
                stored.prompt_index as i64,
                stored.url,
                stored.text,
                stored.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;
        Ok(stored.id)
    }

    fn list(&self) -> StorageResult<Vec<Bookmark>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, title, site, chat_id, prompt_index, url, text, timestamp
             FROM bookmarks ORDER BY timestamp DESC, rowid DESC",
        )?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(into_bookmark).collect()
    }

    fn delete(&self, id: &str) -> StorageResult<bool> {
        let conn = self.lock();
        let changed = conn.execute("DELETE FROM bookmarks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    fn clear(&self) -> StorageResult<usize> {
        let conn = self.lock();
        Ok(conn.execute("DELETE FROM bookmarks", [])?)
    }
}
