//! TMDB (The Movie Database) API client
//!
//! Movie search, the popularity-ranked discover listing and movie details.
//! API docs: https://developer.themoviedb.org/docs

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{Movie, MovieDetail};

/// Default TMDB v3 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
///
/// Authenticates with a v4 read access token sent as a bearer credential.
/// Failed requests are not retried; a new user action starts a new attempt.
pub struct TmdbClient {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given bearer token
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Make an authenticated GET request and decode the JSON body
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "tmdb request");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(TmdbError::from)?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await.map_err(TmdbError::from)?;
                let parsed: T = serde_json::from_str(&body).map_err(|e| {
                    TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                })?;
                Ok(parsed)
            }
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound.into()),
            status => Err(TmdbError::Status(status.as_u16()).into()),
        }
    }

    /// Movie listing for a search term.
    ///
    /// An empty (or all-whitespace) term selects the popularity-ranked
    /// discover listing instead of the search endpoint.
    pub async fn movies(&self, term: &str) -> Result<Vec<Movie>> {
        let term = term.trim();
        if term.is_empty() {
            self.discover_popular().await
        } else {
            self.search_movies(term).await
        }
    }

    /// Search movies by title
    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
        let endpoint = format!("/search/movie?query={}", urlencoding::encode(query));
        let response: ListResponse = self.get(&endpoint).await?;
        Ok(response.into_movies())
    }

    /// Most popular movies right now
    pub async fn discover_popular(&self) -> Result<Vec<Movie>> {
        let response: ListResponse = self.get("/discover/movie?sort_by=popularity.desc").await?;
        Ok(response.into_movies())
    }

    /// Get movie details by ID
    pub async fn movie_detail(&self, id: u64) -> Result<MovieDetail> {
        let endpoint = format!("/movie/{}", id);
        let response: MovieResponse = self.get(&endpoint).await?;
        Ok(response.into_detail())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    // Missing "results" is treated as an empty listing
    #[serde(default)]
    results: Option<Vec<MovieRaw>>,
}

impl ListResponse {
    fn into_movies(self) -> Vec<Movie> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .map(MovieRaw::into_movie)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct MovieRaw {
    id: u64,
    title: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
    release_date: Option<String>,
    original_language: Option<String>,
}

impl MovieRaw {
    fn into_movie(self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.unwrap_or_default(),
            poster_path: self.poster_path,
            vote_average: self.vote_average.unwrap_or(0.0),
            release_date: non_empty(self.release_date),
            original_language: non_empty(self.original_language),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieResponse {
    id: u64,
    title: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
    release_date: Option<String>,
    original_language: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<NamedRaw>,
    overview: Option<String>,
    budget: Option<u64>,
    revenue: Option<u64>,
    #[serde(default)]
    production_companies: Vec<NamedRaw>,
    #[serde(default)]
    production_countries: Vec<NamedRaw>,
    #[serde(default)]
    spoken_languages: Vec<LanguageRaw>,
    homepage: Option<String>,
    status: Option<String>,
    tagline: Option<String>,
}

impl MovieResponse {
    fn into_detail(self) -> MovieDetail {
        MovieDetail {
            id: self.id,
            title: self.title.unwrap_or_default(),
            poster_path: self.poster_path,
            vote_average: self.vote_average.unwrap_or(0.0),
            release_date: non_empty(self.release_date),
            original_language: non_empty(self.original_language),
            runtime: self.runtime,
            genres: names(self.genres),
            overview: self.overview.unwrap_or_default(),
            budget: self.budget.unwrap_or(0),
            revenue: self.revenue.unwrap_or(0),
            production_companies: names(self.production_companies),
            production_countries: names(self.production_countries),
            spoken_languages: self
                .spoken_languages
                .into_iter()
                .filter_map(LanguageRaw::into_name)
                .collect(),
            homepage: non_empty(self.homepage),
            status: non_empty(self.status),
            tagline: non_empty(self.tagline),
        }
    }
}

/// Genres, companies and countries all carry a "name"
#[derive(Debug, Deserialize)]
struct NamedRaw {
    name: String,
}

#[derive(Debug, Deserialize)]
struct LanguageRaw {
    name: Option<String>,
    english_name: Option<String>,
}

impl LanguageRaw {
    // TMDB leaves "name" empty for some languages
    fn into_name(self) -> Option<String> {
        non_empty(self.name).or_else(|| non_empty(self.english_name))
    }
}

fn names(raw: Vec<NamedRaw>) -> Vec<String> {
    raw.into_iter().map(|n| n.name).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
