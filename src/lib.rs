//! ReelTUI - Neon TUI for discovering movies
//!
//! A terminal interface for searching the TMDB catalog with debounced live
//! results, a trending strip of past searches, and a detail overlay.
//!
//! # Modules
//!
//! - `models` - Movies, movie details, trending entries
//! - `api` - TMDB client
//! - `store` - Trending search counters (SQLite or Appwrite)
//! - `debounce` - Search input debouncing
//! - `app` - Application state and key handling
//! - `worker` - Background request execution
//! - `config` - Config file and environment
//! - `logging` - File-based tracing setup
//! - `cli` / `commands` - Scriptable command line
//! - `ui` - TUI components

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;
pub mod worker;

// Re-export commonly used types
pub use models::{Movie, MovieDetail, TrendingEntry};

pub use api::{TmdbClient, TmdbError};
pub use app::{App, AppSettings, ModalPhase, Request, Response};
pub use config::{Config, ConfigError};
pub use debounce::Debouncer;
pub use store::{StoreError, TrendingStore};
pub use worker::Worker;
