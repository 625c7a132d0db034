use std::fmt::Write;
use std::time::SystemTime;

use serde_json::json;

use crate::state::AppState;

/// Counters for the current interactive session
#[derive(Clone, Debug, Default)]
pub struct SessionStatus {
    pub translated: u64,
    pub fallbacks: u64,
    pub last_fallback: Option<String>,
    pub last_translation_time: Option<SystemTime>,
}

pub async fn render_status(state: &AppState) -> String {
    let service = state.service();
    let rate_limit = service.rate_limit_status();
    let cache = service.cache_stats();
    let session = state.status.read().await.clone();

    let mut out = String::new();
    let _ = writeln!(out, "language:       {}", service.language());
    if rate_limit.is_limited {
        let _ = writeln!(
            out,
            "rate limit:     active, {} min remaining",
            rate_limit.minutes_remaining
        );
    } else {
        let _ = writeln!(out, "rate limit:     none");
    }
    let _ = writeln!(
        out,
        "cache:          {} in memory, {} persisted ({} bytes of {})",
        cache.memory_entries,
        cache.persisted_entries,
        cache.persisted_bytes,
        state.config.cache.max_persisted_bytes
    );
    let _ = writeln!(out, "storage:        {}", state.config.storage_path.display());
    let _ = write!(
        out,
        "session:        {} translated, {} untranslated",
        session.translated, session.fallbacks
    );
    if let Some(reason) = session.last_fallback {
        let _ = write!(out, " (last: {reason})");
    }

    out
}

pub fn status_json(state: &AppState) -> serde_json::Value {
    let service = state.service();
    let cache = service.cache_stats();

    json!({
        "language": service.language(),
        "rateLimit": service.rate_limit_status(),
        "cache": {
            "memoryEntries": cache.memory_entries,
            "persistedEntries": cache.persisted_entries,
            "persistedBytes": cache.persisted_bytes,
            "maxPersistedBytes": state.config.cache.max_persisted_bytes,
        },
    })
}

#[cfg(test)]
mod tests {
    use tafsiri_config::Config;

    use super::*;

    fn state_in(dir: &tempfile::TempDir) -> AppState {
        let config = Config {
            storage_path: dir.path().join("store.json"),
            default_language: Some("sw".to_string()),
            ..Config::default()
        };
        AppState::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_render_fresh_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        let rendered = render_status(&state).await;
        assert!(rendered.contains("language:       sw"));
        assert!(rendered.contains("rate limit:     none"));
        assert!(rendered.contains("0 translated, 0 untranslated"));
    }

    #[tokio::test]
    async fn test_render_includes_last_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);
        {
            let mut status = state.status.write().await;
            status.fallbacks = 2;
            status.last_fallback = Some("rate limited".to_string());
        }

        let rendered = render_status(&state).await;
        assert!(rendered.contains("2 untranslated (last: rate limited)"));
    }

    #[test]
    fn test_status_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir);

        let value = status_json(&state);
        assert_eq!(value["language"], "sw");
        assert_eq!(value["rateLimit"]["isLimited"], false);
        assert_eq!(value["cache"]["persistedEntries"], 0);
    }
}
