//! Background worker for network requests
//!
//! Executes [`Request`]s on spawned tokio tasks and reports each outcome as a
//! [`Response`] on an unbounded channel drained by the event loop. Without a
//! trending store, store requests fail and the app carries on without it.

use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::TmdbClient;
use crate::app::{Request, Response};
use crate::store::TrendingStore;

/// Spawns request tasks and routes their results back to the app
#[derive(Clone)]
pub struct Worker {
    tmdb: Arc<TmdbClient>,
    store: Option<Arc<TrendingStore>>,
    tx: UnboundedSender<Response>,
}

impl Worker {
    /// Create a worker and the receiving end of its response channel
    pub fn new(
        tmdb: Arc<TmdbClient>,
        store: Option<Arc<TrendingStore>>,
    ) -> (Self, UnboundedReceiver<Response>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tmdb, store, tx }, rx)
    }

    /// Run `request` in the background
    pub fn dispatch(&self, request: Request) {
        let worker = self.clone();
        tokio::spawn(async move {
            let response = worker.execute(request).await;
            // The receiver is gone only during shutdown
            if worker.tx.send(response).is_err() {
                tracing::debug!("response dropped, event loop closed");
            }
        });
    }

    /// Run `request` to completion
    pub async fn execute(&self, request: Request) -> Response {
        match request {
            Request::LoadTrending { limit } => {
                let result = match self.store() {
                    Ok(store) => store.top(limit).await.map_err(anyhow::Error::from),
                    Err(e) => Err(e),
                };
                Response::Trending(result)
            }
            Request::FetchMovies { seq, term } => {
                let result = self.tmdb.movies(&term).await;
                Response::Movies { seq, term, result }
            }
            Request::FetchDetail { seq, id } => {
                let result = self.tmdb.movie_detail(id).await;
                Response::Detail { seq, id, result }
            }
            Request::RecordSearch { term, movie } => {
                let result = match self.store() {
                    Ok(store) => store.record_search(&term, &movie).await.map_err(anyhow::Error::from),
                    Err(e) => Err(e),
                };
                Response::Recorded { term, result }
            }
        }
    }

    fn store(&self) -> anyhow::Result<&TrendingStore> {
        self.store
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("trending store unavailable"))
    }
}
