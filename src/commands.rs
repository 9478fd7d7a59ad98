//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the TMDB client and the trending
//! store. Each handler takes its CLI args and an Output, returns ExitCode.

use crate::api::TmdbClient;
use crate::cli::{Command, ExitCode, InfoCmd, Output, PopularCmd, SearchCmd, SearchOutput, TrendingCmd};
use crate::config::Config;
use crate::models::{format_money, rating_str};
use crate::store::{StoreError, TrendingStore};

/// Run a subcommand against the configured services
pub async fn run(command: Command, config: &Config, output: &Output) -> ExitCode {
    match command {
        // Trending only needs the store, not TMDB
        Command::Trending(cmd) => match config.open_store() {
            Ok(store) => trending_cmd(cmd, &store, output).await,
            Err(e) => output.error(e.to_string(), ExitCode::from(&e)),
        },
        Command::Search(cmd) => {
            let client = match tmdb_client(config, output) {
                Ok(client) => client,
                Err(code) => return code,
            };
            let store = if cmd.no_record {
                None
            } else {
                config
                    .open_store()
                    .map_err(|e| tracing::warn!(error = %e, "trending store unavailable, search not recorded"))
                    .ok()
            };
            search_cmd(cmd, &client, store.as_ref(), output).await
        }
        Command::Popular(cmd) => match tmdb_client(config, output) {
            Ok(client) => popular_cmd(cmd, &client, output).await,
            Err(code) => code,
        },
        Command::Info(cmd) => match tmdb_client(config, output) {
            Ok(client) => info_cmd(cmd, &client, output).await,
            Err(code) => code,
        },
    }
}

/// TMDB client for the configured token, or the reported exit code
fn tmdb_client(config: &Config, output: &Output) -> Result<TmdbClient, ExitCode> {
    config
        .tmdb_token()
        .map(|token| TmdbClient::with_base_url(token, config.tmdb_base_url()))
        .map_err(|e| output.error(e.to_string(), ExitCode::from(&e)))
}

fn store_exit_code(err: &StoreError) -> ExitCode {
    match err {
        StoreError::RequestFailed(_) | StoreError::Remote { .. } => ExitCode::NetworkError,
        StoreError::Misconfigured(_) => ExitCode::ConfigError,
        _ => ExitCode::Error,
    }
}

// =============================================================================
// Search Command
// =============================================================================

/// Search by title; an empty query lists popular movies. A non-empty search
/// with results is counted in `store` when one is given.
pub async fn search_cmd(
    cmd: SearchCmd,
    client: &TmdbClient,
    store: Option<&TrendingStore>,
    output: &Output,
) -> ExitCode {
    let term = cmd.query.trim().to_string();
    if term.is_empty() {
        output.info("Empty query, listing popular movies");
    } else {
        output.info(format!("Searching for: {}", term));
    }

    let mut results = match client.movies(&term).await {
        Ok(results) => results,
        Err(e) => return output.error(format!("Search failed: {}", e), ExitCode::from(&e)),
    };

    if results.is_empty() {
        return output.error(format!("No movies found for \"{}\"", term), ExitCode::NoResults);
    }

    let mut search_count = None;
    if let (Some(store), false) = (store, term.is_empty()) {
        match store.record_search(&term, &results[0]).await {
            Ok(count) => {
                tracing::info!(term = %term, count, "search recorded");
                search_count = Some(count);
            }
            Err(e) => {
                tracing::warn!(term = %term, error = %e, "failed to record search");
                output.info(format!("Warning: search not recorded ({})", e));
            }
        }
    }

    results.truncate(cmd.limit);

    if output.json {
        let data = SearchOutput {
            term,
            results,
            search_count,
        };
        if let Err(e) = output.print(&data) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.print_lines(&results);
        if let Some(count) = search_count {
            output.info(format!("\"{}\" searched {} time(s)", term, count));
        }
    }
    ExitCode::Success
}

// =============================================================================
// Popular Command
// =============================================================================

pub async fn popular_cmd(cmd: PopularCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    output.info("Fetching popular movies...");

    match client.discover_popular().await {
        Ok(results) if results.is_empty() => output.error("No movies found", ExitCode::NoResults),
        Ok(mut results) => {
            results.truncate(cmd.limit);
            if output.json {
                if let Err(e) = output.print(&results) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else {
                output.print_lines(&results);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Popular fetch failed: {}", e), ExitCode::from(&e)),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, client: &TmdbClient, output: &Output) -> ExitCode {
    output.info(format!("Getting info for: {}", cmd.id));

    let detail = match client.movie_detail(cmd.id).await {
        Ok(detail) => detail,
        Err(e) => return output.error(format!("Movie info failed: {}", e), ExitCode::from(&e)),
    };

    if output.json {
        if let Err(e) = output.print(&detail) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
        return ExitCode::Success;
    }

    println!("{}", detail);
    if let Some(tagline) = &detail.tagline {
        println!("\"{}\"", tagline);
    }
    println!();
    println!("Rating:     {}", rating_str(detail.vote_average));
    println!("Released:   {}", detail.release_date_long().unwrap_or_else(|| "N/A".into()));
    println!("Status:     {}", detail.status.as_deref().unwrap_or("N/A"));
    println!("Genres:     {}", or_na(&detail.genres));
    println!("Languages:  {}", or_na(&detail.spoken_languages));
    println!("Countries:  {}", or_na(&detail.production_countries));
    println!("Companies:  {}", or_na(&detail.production_companies));
    println!("Budget:     {}", money(detail.budget));
    println!("Revenue:    {}", money(detail.revenue));
    if let Some(homepage) = &detail.homepage {
        println!("Homepage:   {}", homepage);
    }
    if !detail.overview.is_empty() {
        println!();
        println!("{}", detail.overview);
    }
    ExitCode::Success
}

fn or_na(items: &[String]) -> String {
    if items.is_empty() {
        "N/A".to_string()
    } else {
        items.join(", ")
    }
}

fn money(amount: u64) -> String {
    if amount == 0 {
        "N/A".to_string()
    } else {
        format_money(amount)
    }
}

// =============================================================================
// Trending Command
// =============================================================================

pub async fn trending_cmd(cmd: TrendingCmd, store: &TrendingStore, output: &Output) -> ExitCode {
    output.info(format!("Top searches ({} store)", store.backend_name()));

    match store.top(cmd.limit).await {
        Ok(entries) if entries.is_empty() => {
            output.error("No searches recorded yet", ExitCode::NoResults)
        }
        Ok(entries) => {
            if output.json {
                if let Err(e) = output.print(&entries) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else {
                output.print_lines(
                    entries
                        .iter()
                        .enumerate()
                        .map(|(i, entry)| format!("{:>2}. {}", i + 1, entry)),
                );
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Trending fetch failed: {}", e), store_exit_code(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_exit_codes() {
        assert_eq!(
            store_exit_code(&StoreError::Remote {
                status: 401,
                message: "unauthorized".into()
            }),
            ExitCode::NetworkError
        );
        assert_eq!(
            store_exit_code(&StoreError::Misconfigured("x".into())),
            ExitCode::ConfigError
        );
        assert_eq!(store_exit_code(&StoreError::Poisoned), ExitCode::Error);
    }

    #[tokio::test]
    async fn test_trending_without_tmdb_token() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store: crate::config::StoreConfig {
                path: Some(dir.path().join("t.sqlite")),
                ..Default::default()
            },
            ..Default::default()
        };
        let output = Output {
            json: true,
            quiet: true,
        };
        // Trending only needs the store; an empty store has nothing to show
        let code = run(
            Command::Trending(TrendingCmd { limit: 5 }),
            &config,
            &output,
        )
        .await;
        assert_eq!(code, ExitCode::NoResults);
    }

    #[tokio::test]
    async fn test_missing_token_is_config_error() {
        let output = Output {
            json: true,
            quiet: true,
        };
        let code = run(
            Command::Popular(PopularCmd { limit: 1 }),
            &Config::default(),
            &output,
        )
        .await;
        assert_eq!(code, ExitCode::ConfigError);
    }
}
