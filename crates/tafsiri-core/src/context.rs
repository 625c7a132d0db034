use std::sync::Arc;

use kanal::{AsyncReceiver, ReceiveError};
use tafsiri_types::{Language, LanguageCode};

use crate::observer::SubscriptionId;
use crate::service::TranslationService;

/// What the rest of the application sees of the translation service
#[derive(Clone)]
pub struct LanguageContext {
    service: Arc<TranslationService>,
}

impl LanguageContext {
    pub fn new(service: Arc<TranslationService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<TranslationService> {
        &self.service
    }

    pub async fn translate(&self, text: &str, target: Option<&str>) -> String {
        self.service.translate(text, target).await
    }

    /// Synchronous cache-only translation
    pub fn t_sync(&self, text: &str, target: Option<&str>) -> String {
        self.service.get_cached_translation(text, target)
    }

    pub async fn translate_batch<S>(&self, texts: &[S], target: Option<&str>) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        self.service.translate_batch(texts, target).await
    }

    pub fn language(&self) -> LanguageCode {
        self.service.language()
    }

    pub fn set_language(&self, lang: &str) -> LanguageCode {
        self.service.set_language(lang)
    }

    pub fn languages(&self) -> &'static [Language] {
        Language::all()
    }

    /// Channel receiving every language switch from now on. Dropping it
    /// unsubscribes.
    pub fn changes(&self) -> LanguageChanges {
        let (tx, rx) = kanal::unbounded_async();

        let id = self.service.subscribe(Arc::new(move |lang: &LanguageCode| {
            if let Err(e) = tx.try_send(lang.clone()) {
                tracing::debug!("Language change not relayed: {e}");
            }
        }));

        LanguageChanges {
            rx,
            id,
            service: self.service.clone(),
        }
    }
}

/// Subscription to language switches, removed from the service on drop
pub struct LanguageChanges {
    rx: AsyncReceiver<LanguageCode>,
    id: SubscriptionId,
    service: Arc<TranslationService>,
}

impl LanguageChanges {
    pub async fn recv(&self) -> Result<LanguageCode, ReceiveError> {
        self.rx.recv().await
    }

    /// Next switch if one is already queued
    pub fn try_recv(&self) -> Result<Option<LanguageCode>, ReceiveError> {
        self.rx.try_recv()
    }
}

impl Drop for LanguageChanges {
    fn drop(&mut self) {
        self.service.unsubscribe(self.id);
    }
}
