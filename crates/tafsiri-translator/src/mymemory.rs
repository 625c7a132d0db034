use async_trait::async_trait;
use serde_json::Value;
use tafsiri_types::LanguageCode;

use crate::{ProviderMetadata, TranslateError, Translation, Translator};

/// Free GET-based provider, always available
#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl MyMemoryTranslator {
    pub fn new(api_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let langpair = format!("{from}|{to}");
        let params = [("q", text), ("langpair", langpair.as_str())];

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
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

        Ok(Translation {
            text: parse_response(&json)?,
            provider: "mymemory".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "MyMemory".to_string(),
        }
    }
}

/// `responseStatus` arrives as a number on success and sometimes as a string on errors
fn response_status(json: &Value) -> Option<u64> {
    match &json["responseStatus"] {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn parse_response(json: &Value) -> Result<String, TranslateError> {
    match response_status(json) {
        Some(200) => {}
        Some(429) => return Err(TranslateError::RateLimitExceeded),
        status => {
            let details = json["responseDetails"].as_str().unwrap_or("no details");
            return Err(TranslateError::ApiError(format!(
                "responseStatus {:?}: {}",
                status, details
            )));
        }
    }

    let translated_text = json["responseData"]["translatedText"]
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(TranslateError::EmptyResponse)?;

    Ok(translated_text.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::serve_once;

    #[test]
    fn test_parse_success() {
        let body = json!({
            "responseStatus": 200,
            "responseData": { "translatedText": "Bonjour", "match": 0.98 }
        });
        assert_eq!(parse_response(&body).unwrap(), "Bonjour");
    }

    #[test]
    fn test_parse_string_status_error() {
        let body = json!({
            "responseStatus": "403",
            "responseDetails": "INVALID LANGUAGE PAIR",
            "responseData": { "translatedText": "INVALID LANGUAGE PAIR" }
        });
        assert!(matches!(
            parse_response(&body),
            Err(TranslateError::ApiError(_))
        ));
    }

    #[test]
    fn test_parse_quota_in_body() {
        let body = json!({ "responseStatus": 429, "responseData": { "translatedText": "" } });
        assert!(parse_response(&body).unwrap_err().is_rate_limit());
    }

    #[test]
    fn test_parse_blank_translation() {
        let body = json!({ "responseStatus": 200, "responseData": { "translatedText": "  " } });
        assert!(matches!(
            parse_response(&body),
            Err(TranslateError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_translate_sends_langpair_query() {
        let (url, request) = serve_once(
            200,
            r#"{"responseStatus":200,"responseData":{"translatedText":"Hola"}}"#,
        )
        .await;

        let translator = MyMemoryTranslator::new(url);
        let result = translator
            .translate(
                "Hello",
                &LanguageCode::pivot(),
                &LanguageCode::normalize("es"),
            )
            .await
            .unwrap();

        assert_eq!(result.text, "Hola");

        let request = request.await.unwrap();
        assert!(request.starts_with("GET "));
        assert!(request.contains("q=Hello"));
        assert!(request.contains("langpair=en%7Ces"));
    }

    #[tokio::test]
    async fn test_http_429_is_rate_limit() {
        let (url, _request) = serve_once(429, "{}").await;

        let translator = MyMemoryTranslator::new(url);
        let err = translator
            .translate(
                "Hello",
                &LanguageCode::pivot(),
                &LanguageCode::normalize("fr"),
            )
            .await
            .unwrap_err();

        assert!(err.is_rate_limit());
    }

    #[tokio::test]
    async fn test_http_500_is_api_error() {
        let (url, _request) = serve_once(500, "oops").await;

        let translator = MyMemoryTranslator::new(url);
        let err = translator
            .translate(
                "Hello",
                &LanguageCode::pivot(),
                &LanguageCode::normalize("fr"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::ApiError(_)));
    }
}
