use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_window_secs() -> u64 {
    60 * 60
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitConfig {
    /// How long every outbound request is suppressed after a provider says 429
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl RateLimitConfig {
    pub fn new() -> Self {
        let window_secs =
            crate::env_parse("TAFSIRI_RATE_LIMIT_SECS").unwrap_or_else(default_window_secs);

        Self { window_secs }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
        }
    }
}
