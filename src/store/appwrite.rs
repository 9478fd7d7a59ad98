//! Appwrite trending store
//!
//! Talks to the Appwrite Databases REST API. Each document in the collection
//! is one search term:
//!
//! ```json
//! { "$id": "…", "searchTerm": "dune", "count": 12, "poster_url": "…", "movie_id": 438631 }
//! ```
//!
//! Appwrite has no atomic increment, so recording is read-then-write.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use super::StoreError;
use crate::models::TrendingEntry;

/// Connection settings for an Appwrite collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppwriteSettings {
    /// API endpoint including the version, e.g. https://cloud.appwrite.io/v1
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    /// Server API key with documents.read/documents.write scopes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Trending store backed by an Appwrite collection
pub struct AppwriteStore {
    settings: AppwriteSettings,
    client: reqwest::Client,
}

impl AppwriteStore {
    pub fn new(settings: AppwriteSettings) -> Result<Self, StoreError> {
        for (name, value) in [
            ("endpoint", &settings.endpoint),
            ("project_id", &settings.project_id),
            ("database_id", &settings.database_id),
            ("collection_id", &settings.collection_id),
        ] {
            if value.trim().is_empty() {
                return Err(StoreError::Misconfigured(format!("appwrite {} is empty", name)));
            }
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Appwrite-Project",
            HeaderValue::from_str(&settings.project_id)
                .map_err(|e| StoreError::Misconfigured(e.to_string()))?,
        );
        if let Some(key) = &settings.api_key {
            headers.insert(
                "X-Appwrite-Key",
                HeaderValue::from_str(key).map_err(|e| StoreError::Misconfigured(e.to_string()))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self { settings, client })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.database_id,
            self.settings.collection_id
        )
    }

    async fn list(&self, queries: &[serde_json::Value]) -> Result<Vec<DocumentRaw>, StoreError> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_string()))
            .collect();

        let response = self
            .client
            .get(self.documents_url())
            .query(&params)
            .send()
            .await?;
        let response = check_status(response).await?;
        let list: DocumentList = response.json().await?;
        Ok(list.documents)
    }

    /// Top `limit` entries by count, highest first
    pub async fn top(&self, limit: usize) -> Result<Vec<TrendingEntry>, StoreError> {
        let documents = self
            .list(&[
                json!({"method": "orderDesc", "attribute": "count"}),
                json!({"method": "limit", "values": [limit]}),
            ])
            .await?;
        Ok(documents.into_iter().map(DocumentRaw::into_entry).collect())
    }

    /// Increment the counter for `term`, creating the document on first
    /// sight. Returns the new count.
    pub async fn record_search(
        &self,
        term: &str,
        poster_url: &str,
        movie_id: u64,
    ) -> Result<u64, StoreError> {
        let existing = self
            .list(&[json!({"method": "equal", "attribute": "searchTerm", "values": [term]})])
            .await?;

        if let Some(doc) = existing.into_iter().next() {
            let count = doc.count + 1;
            let url = format!("{}/{}", self.documents_url(), doc.id);
            let response = self
                .client
                .patch(url)
                .json(&json!({ "data": { "count": count } }))
                .send()
                .await?;
            check_status(response).await?;
            tracing::debug!(term, count, "appwrite: incremented search count");
            Ok(count)
        } else {
            let response = self
                .client
                .post(self.documents_url())
                .json(&json!({
                    "documentId": uuid::Uuid::new_v4().simple().to_string(),
                    "data": {
                        "searchTerm": term,
                        "count": 1,
                        "poster_url": poster_url,
                        "movie_id": movie_id,
                    }
                }))
                .send()
                .await?;
            check_status(response).await?;
            tracing::debug!(term, "appwrite: created search count");
            Ok(1)
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorRaw>()
        .await
        .map(|e| e.message)
        .unwrap_or_default();
    Err(StoreError::Remote {
        status: status.as_u16(),
        message,
    })
}

// =============================================================================
// Response Structures
// =============================================================================

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<DocumentRaw>,
}

#[derive(Debug, Deserialize)]
struct DocumentRaw {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "searchTerm")]
    search_term: String,
    #[serde(default)]
    count: u64,
    #[serde(default)]
    poster_url: Option<String>,
    #[serde(default)]
    movie_id: Option<u64>,
}

impl DocumentRaw {
    fn into_entry(self) -> TrendingEntry {
        TrendingEntry {
            search_term: self.search_term,
            count: self.count,
            poster_url: self.poster_url.unwrap_or_default(),
            movie_id: self.movie_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorRaw {
    #[serde(default)]
    message: String,
}
