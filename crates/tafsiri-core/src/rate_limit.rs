use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tafsiri_types::RateLimitStatus;

use crate::clock::Clock;
use crate::storage::{KeyValueStore, StorageError, keys};

const MINUTE_MS: i64 = 60_000;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateLimitRecord {
    expires_at: i64,
}

/// Global back-off window shared by every provider, text and language.
///
/// Expiry is checked lazily on read; an expired record is deleted then.
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    window: Duration,
    /// Window kept in memory when the store refused to persist it
    unpersisted: Mutex<Option<i64>>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, window: Duration) -> Self {
        Self {
            store,
            clock,
            window,
            unpersisted: Mutex::new(None),
        }
    }

    pub fn status(&self) -> RateLimitStatus {
        let now = self.clock.now_ms();

        let expires_at = match self.persisted_expiry() {
            Some(expires_at) if now < expires_at => Some(expires_at),
            Some(_) => {
                tracing::info!("Translation rate limit window expired");
                self.remove_record();
                None
            }
            None => None,
        };

        let expires_at = expires_at.or_else(|| {
            let mut unpersisted = self.unpersisted();
            match *unpersisted {
                Some(expires_at) if now < expires_at => Some(expires_at),
                _ => {
                    *unpersisted = None;
                    None
                }
            }
        });

        match expires_at {
            Some(expires_at) => {
                // positive here, since now < expires_at
                let remaining = expires_at.saturating_sub(now) as u64;
                RateLimitStatus {
                    is_limited: true,
                    minutes_remaining: remaining.div_ceil(MINUTE_MS as u64),
                }
            }
            None => RateLimitStatus::default(),
        }
    }

    pub fn is_limited(&self) -> bool {
        self.status().is_limited
    }

    /// Open a new window starting now
    pub fn trip(&self) {
        let window_ms = i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX);
        let expires_at = self.clock.now_ms().saturating_add(window_ms);
        tracing::warn!(
            "Translation provider rate limited, pausing requests for {} minutes",
            self.window.as_secs() / 60
        );

        let record = RateLimitRecord { expires_at };
        let persisted = serde_json::to_string(&record)
            .map_err(StorageError::from)
            .and_then(|raw| self.store.set(keys::RATE_LIMIT, &raw));

        match persisted {
            Ok(()) => *self.unpersisted() = None,
            Err(e) => {
                tracing::warn!("Failed to persist rate limit, keeping it in memory: {e}");
                *self.unpersisted() = Some(expires_at);
            }
        }
    }

    pub fn reset(&self) {
        self.remove_record();
        *self.unpersisted() = None;
    }

    fn persisted_expiry(&self) -> Option<i64> {
        let raw = self.store.get(keys::RATE_LIMIT)?;
        match serde_json::from_str::<RateLimitRecord>(&raw) {
            Ok(record) => Some(record.expires_at),
            Err(e) => {
                tracing::warn!("Discarding unreadable rate limit record: {e}");
                self.remove_record();
                None
            }
        }
    }

    fn remove_record(&self) {
        if let Err(e) = self.store.remove(keys::RATE_LIMIT) {
            tracing::warn!("Failed to remove rate limit record: {e}");
        }
    }

    fn unpersisted(&self) -> std::sync::MutexGuard<'_, Option<i64>> {
        self.unpersisted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
