use std::env;

use serde::{Deserialize, Serialize};

fn default_primary_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

fn default_secondary_url() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Remote translation providers.
///
/// The primary provider is always used. The secondary one is tried first,
/// but only when an API key is configured.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_primary_url")]
    pub primary_url: String,
    #[serde(default = "default_secondary_url")]
    pub secondary_url: String,
    #[serde(default)]
    pub secondary_api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let primary_url = env::var("TAFSIRI_PRIMARY_URL").unwrap_or_else(|_| default_primary_url());
        let secondary_url =
            env::var("TAFSIRI_SECONDARY_URL").unwrap_or_else(|_| default_secondary_url());
        let secondary_api_key = env::var("TAFSIRI_SECONDARY_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let timeout_secs = crate::env_parse("TAFSIRI_TIMEOUT_SECS").unwrap_or_else(default_timeout_secs);

        Self {
            primary_url,
            secondary_url,
            secondary_api_key,
            timeout_secs,
        }
    }

    pub fn secondary_enabled(&self) -> bool {
        self.secondary_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            secondary_url: default_secondary_url(),
            secondary_api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
