//! Data structures and types for ReelTUI
//!
//! Contains the shared models used across the application:
//! - **Catalog**: TMDB movies and movie details
//! - **Trending**: persisted search counters shown in the trending strip
//! - **Formatting**: display helpers used by both the TUI and the CLI

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base URL for TMDB poster images
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

// =============================================================================
// Catalog Models (TMDB)
// =============================================================================

/// Movie as returned by the search and discover listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: f32,
    pub release_date: Option<String>,
    pub original_language: Option<String>,
}

impl Movie {
    /// Release year, if the release date is known
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    /// Full poster URL, if the movie has a poster
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path.as_deref().map(poster_url)
    }

    /// A movie with id 0 has no usable identifier
    pub fn has_valid_id(&self) -> bool {
        self.id != 0
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} ★ {}", self.title, year_str, rating_str(self.vote_average))
    }
}

/// Extended movie information for the detail overlay
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub vote_average: f32,
    pub release_date: Option<String>,
    pub original_language: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub overview: String,
    pub budget: u64,
    pub revenue: u64,
    pub production_companies: Vec<String>,
    pub production_countries: Vec<String>,
    pub spoken_languages: Vec<String>,
    pub homepage: Option<String>,
    pub status: Option<String>,
    pub tagline: Option<String>,
}

impl MovieDetail {
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    pub fn poster_url(&self) -> Option<String> {
        self.poster_path.as_deref().map(poster_url)
    }

    /// Release date spelled out, e.g. "March 1, 2022"
    pub fn release_date_long(&self) -> Option<String> {
        self.release_date.as_deref().and_then(format_long_date)
    }
}

/// Detail holding only what a listing already knows; the rest stays empty
impl From<&Movie> for MovieDetail {
    fn from(movie: &Movie) -> Self {
        MovieDetail {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            vote_average: movie.vote_average,
            release_date: movie.release_date.clone(),
            original_language: movie.original_language.clone(),
            ..Default::default()
        }
    }
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self
            .year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        write!(f, "{} ({}) - ★ {}", self.title, year, rating_str(self.vote_average))?;
        if let Some(runtime) = self.runtime.filter(|r| *r > 0) {
            write!(f, " - {}h {}m", runtime / 60, runtime % 60)?;
        }
        Ok(())
    }
}

// =============================================================================
// Trending Models
// =============================================================================

/// A persisted search counter, ranked by `count` in the trending strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub search_term: String,
    pub count: u64,
    pub poster_url: String,
    /// Movie that was the top result when the term was first recorded
    pub movie_id: Option<u64>,
}

impl fmt::Display for TrendingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} searches)", self.search_term, self.count)
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Build a full poster URL from a TMDB poster path ("/abc.jpg" or "abc.jpg")
pub fn poster_url(path: &str) -> String {
    format!("{}/{}", POSTER_BASE_URL, path.trim_start_matches('/'))
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

/// Rating with one decimal, or "N/A" when TMDB has no votes
pub fn rating_str(vote_average: f32) -> String {
    if vote_average > 0.0 {
        format!("{:.1}", vote_average)
    } else {
        "N/A".to_string()
    }
}

/// Compact dollar amount: $1.5M, $2.0K, $999
pub fn format_money(amount: u64) -> String {
    if amount >= 1_000_000 {
        format!("${:.1}M", amount as f64 / 1_000_000.0)
    } else if amount >= 1_000 {
        format!("${:.1}K", amount as f64 / 1_000.0)
    } else {
        format!("${}", amount)
    }
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format "2022-03-01" as "March 1, 2022"
pub fn format_long_date(date: &str) -> Option<String> {
    let mut parts = date.splitn(3, '-');
    let year: u16 = parts.next()?.parse().ok()?;
    let month: usize = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.get(..2)?.parse().ok()?;
    let name = MONTHS.get(month.checked_sub(1)?)?;
    Some(format!("{} {}, {}", name, day, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        Movie {
            id: 438631,
            title: "Dune".into(),
            poster_path: Some("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg".into()),
            vote_average: 7.8,
            release_date: Some("2021-09-15".into()),
            original_language: Some("en".into()),
        }
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2022-03-04"), Some(2022));
        assert_eq!(extract_year("2019"), Some(2019));
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("abc"), None);
    }

    #[test]
    fn test_poster_url_strips_leading_slash() {
        assert_eq!(
            poster_url("/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(poster_url("abc.jpg"), "https://image.tmdb.org/t/p/w500/abc.jpg");
    }

    #[test]
    fn test_movie_helpers() {
        let movie = sample_movie();
        assert_eq!(movie.year(), Some(2021));
        assert!(movie.has_valid_id());
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg")
        );
        assert_eq!(movie.to_string(), "Dune (2021) ★ 7.8");

        let no_id = Movie { id: 0, ..movie };
        assert!(!no_id.has_valid_id());
    }

    #[test]
    fn test_rating_str() {
        assert_eq!(rating_str(7.84), "7.8");
        assert_eq!(rating_str(0.0), "N/A");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(165_000_000), "$165.0M");
        assert_eq!(format_money(1_500_000), "$1.5M");
        assert_eq!(format_money(2_000), "$2.0K");
        assert_eq!(format_money(999), "$999");
        assert_eq!(format_money(0), "$0");
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("2022-03-01").as_deref(), Some("March 1, 2022"));
        assert_eq!(format_long_date("1999-12-31").as_deref(), Some("December 31, 1999"));
        assert_eq!(format_long_date("2022-13-01"), None);
        assert_eq!(format_long_date("2022-00-01"), None);
        assert_eq!(format_long_date(""), None);
    }

    #[test]
    fn test_detail_display() {
        let detail = MovieDetail {
            id: 438631,
            title: "Dune".into(),
            vote_average: 7.8,
            release_date: Some("2021-09-15".into()),
            runtime: Some(155),
            ..Default::default()
        };
        assert_eq!(detail.to_string(), "Dune (2021) - ★ 7.8 - 2h 35m");
        assert_eq!(detail.release_date_long().as_deref(), Some("September 15, 2021"));
    }

    #[test]
    fn test_detail_from_listing_movie() {
        let movie = Movie {
            id: 7,
            title: "Arrival".into(),
            poster_path: Some("/a.jpg".into()),
            vote_average: 7.6,
            release_date: Some("2016-11-10".into()),
            original_language: Some("en".into()),
        };
        let detail = MovieDetail::from(&movie);
        assert_eq!(detail.id, 7);
        assert_eq!(detail.year(), Some(2016));
        assert_eq!(detail.poster_url(), movie.poster_url());
        assert!(detail.genres.is_empty());
        assert_eq!(detail.runtime, None);
    }

    #[test]
    fn test_trending_entry_display() {
        let entry = TrendingEntry {
            search_term: "dune".into(),
            count: 12,
            poster_url: String::new(),
            movie_id: Some(438631),
        };
        assert_eq!(entry.to_string(), "dune (12 searches)");
    }
}
