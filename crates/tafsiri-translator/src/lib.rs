use std::sync::Arc;
use std::time::Duration;

use tafsiri_config::translator::TranslatorConfig;
use tafsiri_types::LanguageCode;

mod google;
mod mymemory;
#[cfg(test)]
mod test_support;

pub use google::GoogleTranslator;
pub use mymemory::MyMemoryTranslator;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    /// Provider id, reported as the origin of the translation
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Empty translation in response")]
    EmptyResponse,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

impl TranslateError {
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, TranslateError::RateLimitExceeded)
    }
}

/// Primary and optional secondary provider built from config
pub struct Providers {
    pub primary: Arc<dyn Translator>,
    pub secondary: Option<Arc<dyn Translator>>,
}

impl Providers {
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let primary: Arc<dyn Translator> = Arc::new(MyMemoryTranslator::with_client(
            client.clone(),
            config.primary_url.clone(),
        ));

        let secondary = match config.secondary_api_key.as_deref() {
            Some(key) if config.secondary_enabled() => {
                tracing::info!("Secondary translation provider enabled");
                Some(Arc::new(GoogleTranslator::with_client(
                    client,
                    key.trim().to_string(),
                    config.secondary_url.clone(),
                )) as Arc<dyn Translator>)
            }
            _ => None,
        };

        Ok(Self { primary, secondary })
    }
}
