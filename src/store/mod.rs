//! Trending search store
//!
//! Persists how often each search term led to results, and serves the
//! top-ranked terms for the trending strip.
//!
//! - `sqlite`: local database file (default)
//! - `appwrite`: hosted Appwrite collection

pub mod appwrite;
pub mod sqlite;

use thiserror::Error;

use crate::models::{Movie, TrendingEntry};

pub use appwrite::{AppwriteSettings, AppwriteStore};
pub use sqlite::SqliteStore;

/// Trending store error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Store returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Store misconfigured: {0}")]
    Misconfigured(String),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// The configured trending backend
pub enum TrendingStore {
    Local(SqliteStore),
    Appwrite(AppwriteStore),
}

impl TrendingStore {
    /// Top `limit` entries ranked by count, highest first
    pub async fn top(&self, limit: usize) -> Result<Vec<TrendingEntry>, StoreError> {
        match self {
            TrendingStore::Local(store) => {
                let store = store.clone();
                tokio::task::spawn_blocking(move || store.top(limit)).await?
            }
            TrendingStore::Appwrite(store) => store.top(limit).await,
        }
    }

    /// Count one more successful search for `term`.
    ///
    /// `movie` is the top result; its poster and id are stored the first time
    /// the term is seen. Every call is a real increment.
    pub async fn record_search(&self, term: &str, movie: &Movie) -> Result<u64, StoreError> {
        let poster_url = movie.poster_url().unwrap_or_default();
        match self {
            TrendingStore::Local(store) => {
                let store = store.clone();
                let term = term.to_string();
                let movie_id = movie.id;
                tokio::task::spawn_blocking(move || store.record_search(&term, &poster_url, movie_id))
                    .await?
            }
            TrendingStore::Appwrite(store) => {
                store.record_search(term, &poster_url, movie.id).await
            }
        }
    }

    /// Backend name for logs and status output
    pub fn backend_name(&self) -> &'static str {
        match self {
            TrendingStore::Local(_) => "local",
            TrendingStore::Appwrite(_) => "appwrite",
        }
    }
}

impl From<SqliteStore> for TrendingStore {
    fn from(store: SqliteStore) -> Self {
        TrendingStore::Local(store)
    }
}

impl From<AppwriteStore> for TrendingStore {
    fn from(store: AppwriteStore) -> Self {
        TrendingStore::Appwrite(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, poster: Option<&str>) -> Movie {
        Movie {
            id,
            title: "Dune".into(),
            poster_path: poster.map(String::from),
            vote_average: 7.8,
            release_date: None,
            original_language: None,
        }
    }

    #[tokio::test]
    async fn test_record_search_uses_movie_poster() {
        let store: TrendingStore = SqliteStore::open_in_memory().unwrap().into();
        assert_eq!(store.backend_name(), "local");

        store.record_search("dune", &movie(438631, Some("/dune.jpg"))).await.unwrap();
        let top = store.top(5).await.unwrap();
        assert_eq!(top[0].poster_url, "https://image.tmdb.org/t/p/w500/dune.jpg");
        assert_eq!(top[0].movie_id, Some(438631));
    }

    #[tokio::test]
    async fn test_record_search_without_poster() {
        let store: TrendingStore = SqliteStore::open_in_memory().unwrap().into();
        store.record_search("heat", &movie(949, None)).await.unwrap();
        assert_eq!(store.top(5).await.unwrap()[0].poster_url, "");
    }

    #[tokio::test]
    async fn test_repeated_records_increase_monotonically() {
        let store: TrendingStore = SqliteStore::open_in_memory().unwrap().into();
        let m = movie(1, None);
        let mut last = 0;
        for _ in 0..4 {
            let count = store.record_search("alien", &m).await.unwrap();
            assert!(count > last);
            last = count;
        }
        assert_eq!(last, 4);
    }
}
