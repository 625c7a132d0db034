use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::cache::CacheConfig;
use self::rate_limit::RateLimitConfig;
use self::translator::TranslatorConfig;

pub mod cache;
pub mod rate_limit;
pub mod translator;

fn default_storage_path() -> PathBuf {
    PathBuf::from("tafsiri-storage.json")
}

fn default_batch_size() -> usize {
    5
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub cache: CacheConfig,
    pub rate_limit: RateLimitConfig,

    /// Language used when nothing was persisted by a previous session
    pub default_language: Option<String>,
    /// Key-value file backing the persisted cache, rate limit and language
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// Max translations in flight during a batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Config {
    /// Build the config from `TAFSIRI_*` environment variables
    pub fn new() -> Self {
        let default_language = env::var("TAFSIRI_DEFAULT_LANGUAGE")
            .ok()
            .filter(|lang| !lang.trim().is_empty());

        let storage_path = env::var("TAFSIRI_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_storage_path());

        let batch_size = env_parse("TAFSIRI_BATCH_SIZE").unwrap_or_else(default_batch_size);

        Config {
            translator: TranslatorConfig::new(),
            cache: CacheConfig::new(),
            rate_limit: RateLimitConfig::new(),

            default_language,
            storage_path,
            batch_size,
        }
    }

    /// Load a JSON profile. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Batch size with a floor of one
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translator: TranslatorConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
            default_language: None,
            storage_path: default_storage_path(),
            batch_size: default_batch_size(),
        }
    }
}

pub(crate) fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let value = env::var(key).ok()?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {key}: {value:?}");
            None
        }
    }
}
