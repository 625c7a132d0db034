use std::sync::{Arc, PoisonError, RwLock};

use futures_util::future::join_all;
use tafsiri_config::Config;
use tafsiri_translator::{TranslateError, Translation, Translator};
use tafsiri_types::{LanguageCode, RateLimitStatus};

use crate::cache::{CacheStats, TranslationCache};
use crate::clock::{Clock, SystemClock};
use crate::observer::{LanguageCallback, LanguageObservers, SubscriptionId};
use crate::outcome::{FallbackReason, Origin, TranslationOutcome};
use crate::rate_limit::RateLimiter;
use crate::storage::{KeyValueStore, keys};

/// Translates short UI strings on demand.
///
/// Owns the active language, both cache tiers and the rate-limit window.
/// Nothing here fails towards the caller: every degraded path hands back the
/// original text, with the reason available through [`TranslationOutcome`].
pub struct TranslationService {
    store: Arc<dyn KeyValueStore>,
    cache: TranslationCache,
    rate_limit: RateLimiter,
    primary: Arc<dyn Translator>,
    secondary: RwLock<Option<Arc<dyn Translator>>>,
    language: RwLock<LanguageCode>,
    observers: LanguageObservers,
    batch_size: usize,
}

impl TranslationService {
    pub fn new(config: &Config, store: Arc<dyn KeyValueStore>, primary: Arc<dyn Translator>) -> Self {
        Self::with_clock(config, store, primary, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        primary: Arc<dyn Translator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache: TranslationCache::new(store.clone(), config.cache.max_persisted_bytes),
            rate_limit: RateLimiter::new(store.clone(), clock, config.rate_limit.window()),
            store,
            primary,
            secondary: RwLock::new(None),
            language: RwLock::new(LanguageCode::pivot()),
            observers: LanguageObservers::new(),
            batch_size: config.effective_batch_size(),
        }
    }

    /// Restore the active language and the cache from storage.
    ///
    /// A language persisted by an earlier session wins over `default_language`.
    /// Safe to call again; the memory tier is reloaded each time.
    pub fn init(&self, default_language: Option<&str>, secondary: Option<Arc<dyn Translator>>) {
        let language = self
            .store
            .get(keys::LANGUAGE)
            .filter(|lang| !lang.trim().is_empty())
            .or_else(|| default_language.map(str::to_string))
            .map(|lang| normalize_logged(&lang))
            .unwrap_or_else(LanguageCode::pivot);

        if let Some(provider) = &secondary {
            tracing::info!("Using {} ahead of the primary provider", provider.metadata().name);
        }
        *self.secondary.write().unwrap_or_else(PoisonError::into_inner) = secondary;

        tracing::info!("Translation service ready, language: {language}");
        *self.language.write().unwrap_or_else(PoisonError::into_inner) = language;

        self.cache.load();
    }

    pub fn language(&self) -> LanguageCode {
        self.language
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Switch the active language, drop the memory tier and notify subscribers
    pub fn set_language(&self, lang: &str) -> LanguageCode {
        let lang = normalize_logged(lang);

        if let Err(e) = self.store.set(keys::LANGUAGE, lang.as_str()) {
            tracing::warn!("Failed to persist language {lang}: {e}");
        }

        *self.language.write().unwrap_or_else(PoisonError::into_inner) = lang.clone();
        self.cache.clear_memory();

        tracing::info!("Language changed to {lang}");
        self.observers.notify(&lang);
        lang
    }

    pub fn subscribe(&self, callback: LanguageCallback) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Translate `text`, or return it unchanged when that is not possible
    pub async fn translate(&self, text: &str, target: Option<&str>) -> String {
        self.translate_detailed(text, target).await.into_text()
    }

    pub async fn translate_detailed(&self, text: &str, target: Option<&str>) -> TranslationOutcome {
        if text.trim().is_empty() {
            return TranslationOutcome::Passthrough(text.to_string());
        }

        let lang = self.resolve_target(target);
        self.translate_to(text, &lang).await
    }

    /// Translate every text, keeping input order. At most `batch_size`
    /// requests are in flight at once.
    pub async fn translate_batch<S>(&self, texts: &[S], target: Option<&str>) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        let lang = self.resolve_target(target);
        if lang.is_pivot() {
            return texts.iter().map(|t| t.as_ref().to_string()).collect();
        }

        let mut results = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size) {
            let outcomes = join_all(chunk.iter().map(|text| {
                let text = text.as_ref();
                let lang = &lang;
                async move {
                    if text.trim().is_empty() {
                        return text.to_string();
                    }
                    self.translate_to(text, lang).await.into_text()
                }
            }))
            .await;
            results.extend(outcomes);
        }

        results
    }

    /// Cache-only lookup for callers that cannot wait on the network
    pub fn get_cached_translation(&self, text: &str, target: Option<&str>) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let lang = self.resolve_target(target);
        if lang.is_pivot() {
            return text.to_string();
        }

        match self.cache.lookup(text, &lang) {
            Some((hit, _)) => hit,
            None => text.to_string(),
        }
    }

    pub fn clear_cache(&self) {
        tracing::info!("Clearing translation cache");
        self.cache.clear_all();
    }

    pub fn clear_language_cache(&self, lang: &str) {
        let lang = LanguageCode::normalize(lang);
        tracing::info!("Clearing cached translations for {lang}");
        self.cache.clear_language(&lang);
    }

    pub fn rate_limit_status(&self) -> RateLimitStatus {
        self.rate_limit.status()
    }

    pub fn reset_rate_limit(&self) {
        tracing::info!("Rate limit window cleared");
        self.rate_limit.reset();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn resolve_target(&self, target: Option<&str>) -> LanguageCode {
        match target {
            Some(lang) => normalize_logged(lang),
            None => self.language(),
        }
    }

    async fn translate_to(&self, text: &str, lang: &LanguageCode) -> TranslationOutcome {
        if lang.is_pivot() {
            return TranslationOutcome::Passthrough(text.to_string());
        }

        if let Some((hit, tier)) = self.cache.lookup(text, lang) {
            tracing::debug!("Cache hit ({tier:?}) for {lang}");
            return TranslationOutcome::Translated {
                text: hit,
                origin: tier.into(),
            };
        }

        if self.rate_limit.is_limited() {
            tracing::debug!("Rate limited, skipping provider for {lang}");
            return fallback(text, FallbackReason::RateLimited);
        }

        match self.fetch(text, lang).await {
            Ok(translation) if is_echo(text, &translation.text) => {
                tracing::warn!(
                    "{} returned the input unchanged for {lang}, not caching",
                    translation.provider
                );
                fallback(text, FallbackReason::Echoed)
            }
            Ok(translation) => {
                tracing::debug!("Translated into {lang} via {}", translation.provider);
                self.cache.insert(text, lang, &translation.text);
                TranslationOutcome::Translated {
                    text: translation.text,
                    origin: Origin::Provider(translation.provider),
                }
            }
            Err(e) if e.is_rate_limit() => {
                self.rate_limit.trip();
                fallback(text, FallbackReason::RateLimited)
            }
            Err(e) => {
                tracing::warn!("Translation into {lang} failed: {e}");
                fallback(text, FallbackReason::Provider(e))
            }
        }
    }

    /// Secondary provider first when configured, primary on any secondary failure
    async fn fetch(&self, text: &str, lang: &LanguageCode) -> Result<Translation, TranslateError> {
        let source = LanguageCode::pivot();

        let secondary = self
            .secondary
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(secondary) = secondary {
            match secondary.translate(text, &source, lang).await {
                Ok(translation) => return Ok(translation),
                Err(e) => tracing::warn!(
                    "{} failed ({e}), falling back to {}",
                    secondary.metadata().name,
                    self.primary.metadata().name
                ),
            }
        }

        self.primary.translate(text, &source, lang).await
    }
}

fn fallback(text: &str, reason: FallbackReason) -> TranslationOutcome {
    TranslationOutcome::Fallback {
        text: text.to_string(),
        reason,
    }
}

fn normalize_logged(raw: &str) -> LanguageCode {
    let lang = LanguageCode::normalize(raw);
    if !lang.is_supported() {
        tracing::warn!("Unsupported language code {raw:?}, trying {lang} anyway");
    }
    lang
}

/// Blank output, or output equal to the input ignoring case and whitespace
fn is_echo(original: &str, translated: &str) -> bool {
    let squash = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let translated = squash(translated);
    translated.is_empty() || translated == squash(original)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_ignores_case_and_whitespace() {
        assert!(is_echo("Book now", "  BOOK   now "));
        assert!(is_echo("Book now", ""));
        assert!(!is_echo("Book now", "Réserver"));
    }
}
