use serde::{Deserialize, Serialize};

/// 4 MiB, roughly what a browser origin gets before quota errors start
fn default_max_persisted_bytes() -> usize {
    4 * 1024 * 1024
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    /// Upper bound on the serialized persisted tier. Crossing it resets the tier.
    #[serde(default = "default_max_persisted_bytes")]
    pub max_persisted_bytes: usize,
}

impl CacheConfig {
    pub fn new() -> Self {
        let max_persisted_bytes = crate::env_parse("TAFSIRI_CACHE_MAX_BYTES")
            .unwrap_or_else(default_max_persisted_bytes);

        Self {
            max_persisted_bytes,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_persisted_bytes: default_max_persisted_bytes(),
        }
    }
}
