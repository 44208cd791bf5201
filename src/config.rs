//! Storage locations for the catalog store.
//!
//! Paths are explicit construction parameters instead of process-wide
//! constants, so parallel store instances (and tests) never collide. The
//! shell resolves its configuration from an optional JSON file plus
//! environment overrides; the store itself only ever sees a finished
//! [`CatalogConfig`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Env var naming an explicit config file.
pub const CONFIG_ENV: &str = "SHELFMARK_CONFIG";
/// Env var overriding the catalog file path.
pub const STORAGE_ENV: &str = "SHELFMARK_LIBRARY";
/// Env var overriding the history ledger path.
pub const HISTORY_ENV: &str = "SHELFMARK_HISTORY";

const DEFAULT_STORAGE_PATH: &str = "library.csv";
const DEFAULT_HISTORY_PATH: &str = "history.csv";
const LOCAL_CONFIG_FILE: &str = "shelfmark.json";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
/// Where the store reads and writes its two files.
pub struct CatalogConfig {
    pub storage_path: PathBuf,
    pub history_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
        }
    }
}

impl CatalogConfig {
    pub fn new(storage_path: impl Into<PathBuf>, history_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
            history_path: history_path.into(),
        }
    }

    /// Read a config file ( `{"storage_path": ..., "history_path": ...}` ).
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Resolve the shell's configuration from the process environment.
///
/// Search order: an explicit `SHELFMARK_CONFIG` file, then `shelfmark.json`
/// in the working directory, then built-in defaults. A named config file
/// that cannot be read is an error rather than a silent fallback. The
/// per-path env overrides apply last.
pub fn resolve_config() -> Result<CatalogConfig> {
    resolve_config_with(|name| env::var(name).ok())
}

fn resolve_config_with(get: impl Fn(&str) -> Option<String>) -> Result<CatalogConfig> {
    let mut config = match get(CONFIG_ENV) {
        Some(explicit) if !explicit.trim().is_empty() => {
            CatalogConfig::from_file(Path::new(&explicit))?
        }
        _ => {
            let local = Path::new(LOCAL_CONFIG_FILE);
            if local.is_file() {
                CatalogConfig::from_file(local)?
            } else {
                CatalogConfig::default()
            }
        }
    };

    if let Some(storage) = get(STORAGE_ENV) {
        if !storage.trim().is_empty() {
            config.storage_path = PathBuf::from(storage);
        }
    }
    if let Some(history) = get(HISTORY_ENV) {
        if !history.trim().is_empty() {
            config.history_path = PathBuf::from(history);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_without_env() {
        let config = resolve_config_with(|_| None).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn config_file_wins_over_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"storage_path": "books.csv", "history_path": "ledger.csv"}}"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = resolve_config_with(|name| {
            (name == CONFIG_ENV).then(|| path.clone())
        })
        .unwrap();
        assert_eq!(config.storage_path, PathBuf::from("books.csv"));
        assert_eq!(config.history_path, PathBuf::from("ledger.csv"));
    }

    #[test]
    fn path_overrides_apply_last() {
        let config = resolve_config_with(|name| match name {
            STORAGE_ENV => Some("/tmp/override.csv".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.storage_path, PathBuf::from("/tmp/override.csv"));
        assert_eq!(config.history_path, CatalogConfig::default().history_path);
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = resolve_config_with(|name| match name {
            HISTORY_ENV => Some("  ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.history_path, CatalogConfig::default().history_path);
    }

    #[test]
    fn missing_named_config_file_is_an_error() {
        let result = resolve_config_with(|name| {
            (name == CONFIG_ENV).then(|| "/nonexistent/shelfmark.json".to_string())
        });
        assert!(result.is_err());
    }
}
