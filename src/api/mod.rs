//! API clients for external services
//!
//! - TMDB: movie search, discover listing and details

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbError};
