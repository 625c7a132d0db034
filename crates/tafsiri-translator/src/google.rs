use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tafsiri_types::LanguageCode;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// Keyed POST-based provider, preferred when a key is configured
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

impl GoogleTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, api_url)
    }

    pub fn with_client(client: reqwest::Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let body = TranslateRequest {
            q: text,
            source: from.as_str(),
            target: to.as_str(),
            format: "text",
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 401 || response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let translated_text = json["data"]["translations"]
            .get(0)
            .and_then(|t| t["translatedText"].as_str())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        if translated_text.trim().is_empty() {
            return Err(TranslateError::EmptyResponse);
        }

        Ok(Translation {
            text: translated_text.trim().to_string(),
            provider: "google".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    fn langs(to: &str) -> (LanguageCode, LanguageCode) {
        (LanguageCode::pivot(), LanguageCode::normalize(to))
    }

    #[tokio::test]
    async fn test_translate_posts_json_body() {
        let (url, request) = serve_once(
            200,
            r#"{"data":{"translations":[{"translatedText":"Habari"}]}}"#,
        )
        .await;

        let translator = GoogleTranslator::new("secret".to_string(), url);
        let (from, to) = langs("sw");
        let result = translator.translate("Hello", &from, &to).await.unwrap();
        assert_eq!(result.text, "Habari");
        assert_eq!(result.provider, "google");

        let request = request.await.unwrap();
        assert!(request.starts_with("POST "));
        assert!(request.contains("key=secret"));
        assert!(request.contains(r#""q":"Hello""#));
        assert!(request.contains(r#""target":"sw""#));
        assert!(request.contains(r#""format":"text""#));
    }

    #[tokio::test]
    async fn test_http_429_is_rate_limit() {
        let (url, _request) = serve_once(429, "{}").await;

        let translator = GoogleTranslator::new("secret".to_string(), url);
        let (from, to) = langs("de");
        let err = translator.translate("Hello", &from, &to).await.unwrap_err();
        assert!(err.is_rate_limit());
    }

    #[tokio::test]
    async fn test_http_403_is_auth_error() {
        let (url, _request) = serve_once(403, "{}").await;

        let translator = GoogleTranslator::new("bad".to_string(), url);
        let (from, to) = langs("de");
        let err = translator.translate("Hello", &from, &to).await.unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }

    #[tokio::test]
    async fn test_missing_translations_is_api_error() {
        let (url, _request) = serve_once(200, r#"{"data":{"translations":[]}}"#).await;

        let translator = GoogleTranslator::new("secret".to_string(), url);
        let (from, to) = langs("de");
        let err = translator.translate("Hello", &from, &to).await.unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_empty_key_is_rejected_without_request() {
        let translator = GoogleTranslator::new(String::new(), "http://127.0.0.1:9".to_string());
        let (from, to) = langs("de");
        let err = translator.translate("Hello", &from, &to).await.unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }
}
