//! Local SQLite trending store
//!
//! One row per search term. The upsert is a single statement so concurrent
//! recorders never lose an increment. Calls block; async callers go through
//! [`super::TrendingStore`], which runs them on the blocking pool.

use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::StoreError;
use crate::models::TrendingEntry;

/// Trending store backed by a local SQLite file. Clones share the connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file and run the schema migration
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Private in-memory database, gone when the store is dropped
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS searches (
                search_term TEXT PRIMARY KEY,
                count INTEGER NOT NULL DEFAULT 1,
                poster_url TEXT NOT NULL DEFAULT '',
                movie_id INTEGER
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Top `limit` entries by count, highest first
    pub fn top(&self, limit: usize) -> Result<Vec<TrendingEntry>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT search_term, count, poster_url, movie_id FROM searches
             ORDER BY count DESC, search_term ASC LIMIT ?1",
        )?;

        let entries = stmt
            .query_map(params![limit as i64], |row| {
                Ok(TrendingEntry {
                    search_term: row.get(0)?,
                    count: row.get::<_, i64>(1)?.max(0) as u64,
                    poster_url: row.get(2)?,
                    movie_id: row.get::<_, Option<i64>>(3)?.map(|id| id as u64),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Increment the counter for `term`, inserting it with count 1 (and the
    /// poster/movie metadata) on first sight. Returns the new count.
    pub fn record_search(
        &self,
        term: &str,
        poster_url: &str,
        movie_id: u64,
    ) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO searches (search_term, count, poster_url, movie_id)
             VALUES (?1, 1, ?2, ?3)
             ON CONFLICT(search_term) DO UPDATE SET count = count + 1",
            params![term, poster_url, movie_id as i64],
        )?;
        let count: i64 = conn.query_row(
            "SELECT count FROM searches WHERE search_term = ?1",
            params![term],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_inserts_then_increments() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.record_search("dune", "http://p/dune.jpg", 438631).unwrap(), 1);
        assert_eq!(store.record_search("dune", "http://p/other.jpg", 1).unwrap(), 2);

        let top = store.top(5).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].count, 2);
        // Poster and movie are only stored on first insert
        assert_eq!(top[0].poster_url, "http://p/dune.jpg");
        assert_eq!(top[0].movie_id, Some(438631));
    }

    #[test]
    fn test_terms_are_exact_keys() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.record_search("Dune", "", 1).unwrap();
        store.record_search("dune", "", 1).unwrap();
        assert_eq!(store.top(10).unwrap().len(), 2);
    }

    #[test]
    fn test_top_orders_and_limits() {
        let store = SqliteStore::open_in_memory().unwrap();
        for (term, count) in [("arrival", 7), ("dune", 12), ("heat", 3)] {
            for _ in 0..count {
                store.record_search(term, "", 1).unwrap();
            }
        }

        let top = store.top(2).unwrap();
        let terms: Vec<_> = top.iter().map(|e| e.search_term.as_str()).collect();
        assert_eq!(terms, vec!["dune", "arrival"]);
        assert_eq!(top[0].count, 12);
        assert_eq!(top[1].count, 7);
    }
}
