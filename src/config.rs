//! Configuration management for ReelTUI
//!
//! Handles config file loading/saving, environment overrides and the TMDB
//! credential. Config is stored at ~/.config/reeltui/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::app::{AppSettings, DEFAULT_TRENDING_LIMIT};
use crate::store::{AppwriteSettings, AppwriteStore, SqliteStore, StoreError, TrendingStore};

/// Environment variable holding the TMDB read access token
pub const TMDB_TOKEN_ENV: &str = "TMDB_API_KEY";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TMDB API key missing: set TMDB_API_KEY or tmdb_api_key in the config file")]
    MissingApiKey,

    #[error("Could not determine {0} directory")]
    NoDirectory(&'static str),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Trending store unavailable: {0}")]
    Store(#[from] StoreError),
}

/// Trending store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Local,
    Appwrite,
}

/// `[store]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// SQLite file for the local backend (default: data dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(flatten)]
    pub appwrite: AppwriteSettings,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v4 read access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_api_key: Option<String>,
    /// TMDB API endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_base_url: Option<String>,
    /// Quiet period before a typed search is sent
    pub debounce_ms: u64,
    /// Number of trending entries shown
    pub trending_limit: usize,
    /// tracing filter directive, e.g. "info" or "reeltui=debug"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            tmdb_base_url: None,
            debounce_ms: 500,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            log_level: None,
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Get config file path (~/.config/reeltui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reeltui").join("config.toml"))
    }

    /// Application data directory (~/.local/share/reeltui)
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("reeltui"))
    }

    /// Load config from `path` (or the default location) and apply
    /// environment overrides. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path.map(Path::to_path_buf).or_else(Self::path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides, looked up through `var`
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let set = |target: &mut String, name: &str| {
            if let Some(value) = var(name) {
                *target = value;
            }
        };

        if let Some(key) = var(TMDB_TOKEN_ENV) {
            self.tmdb_api_key = Some(key);
        }
        match var("REELTUI_STORE").as_deref() {
            Some("appwrite") => self.store.backend = StoreBackend::Appwrite,
            Some("local") => self.store.backend = StoreBackend::Local,
            _ => {}
        }

        let appwrite = &mut self.store.appwrite;
        set(&mut appwrite.endpoint, "APPWRITE_ENDPOINT");
        set(&mut appwrite.project_id, "APPWRITE_PROJECT_ID");
        set(&mut appwrite.database_id, "APPWRITE_DATABASE_ID");
        set(&mut appwrite.collection_id, "APPWRITE_COLLECTION_ID");
        if let Some(key) = var("APPWRITE_API_KEY") {
            appwrite.api_key = Some(key);
        }
    }

    /// The TMDB token, validated once at startup
    pub fn tmdb_token(&self) -> Result<&str, ConfigError> {
        self.tmdb_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn tmdb_base_url(&self) -> &str {
        self.tmdb_base_url
            .as_deref()
            .unwrap_or(crate::api::tmdb::DEFAULT_BASE_URL)
    }

    /// Settings handed to the TUI state
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            trending_limit: self.trending_limit,
        }
    }

    /// Open the configured trending store
    pub fn open_store(&self) -> Result<TrendingStore, ConfigError> {
        match self.store.backend {
            StoreBackend::Local => {
                let path = match &self.store.path {
                    Some(path) => path.clone(),
                    None => Self::data_dir()
                        .ok_or(ConfigError::NoDirectory("data"))?
                        .join("trending.sqlite"),
                };
                Ok(SqliteStore::open(&path)?.into())
            }
            StoreBackend::Appwrite => Ok(AppwriteStore::new(self.store.appwrite.clone())?.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.trending_limit, 5);
        assert_eq!(config.store.backend, StoreBackend::Local);
        assert_eq!(config.tmdb_base_url(), "https://api.themoviedb.org/3");
    }

    #[test]
    fn test_missing_token_is_error() {
        let config = Config::default();
        assert!(matches!(config.tmdb_token(), Err(ConfigError::MissingApiKey)));

        let config = Config {
            tmdb_api_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(config.tmdb_token(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config {
            tmdb_api_key: Some("from-file".into()),
            ..Default::default()
        };
        config.apply_env(env(&[
            ("TMDB_API_KEY", "from-env"),
            ("REELTUI_STORE", "appwrite"),
            ("APPWRITE_PROJECT_ID", "proj"),
        ]));
        assert_eq!(config.tmdb_token().unwrap(), "from-env");
        assert_eq!(config.store.backend, StoreBackend::Appwrite);
        assert_eq!(config.store.appwrite.project_id, "proj");
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
            tmdb_api_key = "abc"
            debounce_ms = 250

            [store]
            backend = "appwrite"
            endpoint = "https://cloud.appwrite.io/v1"
            project_id = "p"
            database_id = "d"
            collection_id = "c"
            "#,
        )
        .unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.trending_limit, 5);
        assert_eq!(config.store.backend, StoreBackend::Appwrite);
        assert_eq!(config.store.appwrite.collection_id, "c");
        assert_eq!(config.app_settings().debounce, Duration::from_millis(250));
    }

    #[test]
    fn test_serialized_config_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            tmdb_api_key: Some("abc".into()),
            trending_limit: 8,
            ..Default::default()
        };
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_open_local_store_at_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store: StoreConfig {
                path: Some(dir.path().join("t.sqlite")),
                ..Default::default()
            },
            ..Default::default()
        };
        let store = config.open_store().unwrap();
        assert_eq!(store.backend_name(), "local");
    }
}
