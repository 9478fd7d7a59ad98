//! Log initialization
//!
//! The terminal belongs to the TUI, so events go to a file in the data
//! directory: `~/.local/share/reeltui/reeltui.log`.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Log file name inside the data directory
pub const LOG_FILE: &str = "reeltui.log";

/// Filter directive used when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LEVEL: &str = "info";

/// Resolve the filter directive: `RUST_LOG` wins over the configured level.
pub fn filter_directive(config: &Config, rust_log: Option<String>) -> String {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Install the global subscriber.
///
/// Returns the log file path, or `None` when logging is disabled because the
/// file could not be opened. Only the first call takes effect.
pub fn init(config: &Config) -> Option<PathBuf> {
    let path = Config::data_dir()?.join(LOG_FILE);
    let file = open_log(&path).ok()?;

    let directive = filter_directive(config, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), filter = %directive, "logging started");
    Some(path)
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(filter_directive(&Config::default(), None), "info");
    }

    #[test]
    fn test_config_level_used() {
        let config = Config {
            log_level: Some("reeltui=debug".into()),
            ..Default::default()
        };
        assert_eq!(filter_directive(&config, None), "reeltui=debug");
    }

    #[test]
    fn test_rust_log_overrides_config() {
        let config = Config {
            log_level: Some("warn".into()),
            ..Default::default()
        };
        assert_eq!(filter_directive(&config, Some("trace".into())), "trace");
        assert_eq!(filter_directive(&config, Some("  ".into())), "warn");
    }

    #[test]
    fn test_open_log_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join(LOG_FILE);
        open_log(&path).unwrap();
        assert!(path.exists());
    }
}
