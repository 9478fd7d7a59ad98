//! CLI - Command Line Interface for ReelTUI
//!
//! Every lookup the TUI makes is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Search (records the search in the trending store)
//! reeltui search "dune" --json
//!
//! # Popular listing, movie detail, trending terms
//! reeltui popular --limit 5
//! reeltui info 438631
//! reeltui trending
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::TmdbError;
use crate::config::ConfigError;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// General error
    Error = 1,
    InvalidArgs = 2,
    NetworkError = 3,
    /// Missing credential or unreadable config
    ConfigError = 4,
    NoResults = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        ExitCode::ConfigError
    }
}

impl From<&anyhow::Error> for ExitCode {
    /// TMDB failures map to the network code, anything else is generic
    fn from(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<TmdbError>() {
            Some(TmdbError::NotFound) => ExitCode::NoResults,
            Some(_) => ExitCode::NetworkError,
            None => ExitCode::Error,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// ReelTUI - Neon TUI for discovering movies
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "reeltui",
    version,
    author = "Gorka & Hermes",
    about = "Neon TUI for discovering movies on TMDB",
    long_about = "Search the TMDB catalog with live results, browse trending \
                  searches, and inspect movie details.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  reeltui                        Launch interactive TUI\n\
                  reeltui search \"dune\"          Search for movies\n\
                  reeltui info 438631 --json     Movie details as JSON\n\
                  reeltui trending               Most searched terms"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for movies by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Most popular movies right now
    #[command(visible_alias = "p")]
    Popular(PopularCmd),

    /// Get details for a movie
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Most searched terms
    #[command(visible_alias = "tr")]
    Trending(TrendingCmd),
}

/// Search for movies by query. An empty query lists popular movies.
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(default_value = "")]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,

    /// Don't count this search in the trending store
    #[arg(long)]
    pub no_record: bool,
}

/// List the most popular movies
#[derive(Args, Debug)]
pub struct PopularCmd {
    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Get detailed information about a movie
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB movie ID (e.g., 438631)
    #[arg(required = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub id: u64,
}

/// Show the most searched terms
#[derive(Args, Debug)]
pub struct TrendingCmd {
    /// Maximum number of entries
    #[arg(long, short = 'l', default_value = "5")]
    pub limit: usize,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Search result with the trending count it produced
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub term: String,
    pub results: Vec<crate::models::Movie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_count: Option<u64>,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as a JSON envelope
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print one human-readable line per item
    pub fn print_lines<I>(&self, lines: I)
    where
        I: IntoIterator,
        I::Item: std::fmt::Display,
    {
        for line in lines {
            println!("{}", line);
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
