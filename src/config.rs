//! Configuration file
//!
//! YAML at `<config_dir>/chathop/config.yaml` unless a path is given. Every
//! field is optional; a missing default file means default settings.

use crate::adapter::{AdapterFactory, AdapterResult, SiteProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bookmark database; defaults to `<data_dir>/chathop/chathop.db`
    pub db_path: Option<PathBuf>,
    /// Quiet period before re-scanning a mutated page
    pub debounce_ms: u64,
    /// How often `watch` checks the snapshot file for changes
    pub poll_ms: u64,
    /// Extra or replacement site profiles
    pub sites: Vec<SiteProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            debounce_ms: 500,
            poll_ms: 250,
            sites: Vec::new(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chathop").join("config.yaml"))
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &raw)
    }

    fn parse(path: &Path, raw: &str) -> ConfigResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` (which must exist) or the default file if present.
    pub fn resolve(explicit: Option<&Path>) -> ConfigResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(default_db_path)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms.max(1))
    }

    /// Built-in sites merged with the configured ones.
    pub fn factory(&self) -> AdapterResult<AdapterFactory> {
        AdapterFactory::with_profiles(self.sites.clone())
    }
}

/// Get the default database path (~/.local/share/chathop/chathop.db)
fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("chathop").join("chathop.db")
}
