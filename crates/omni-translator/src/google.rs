use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

/// Target languages the web endpoint is used for
const TARGETS: [&str; 3] = ["en", "zh-TW", "zh-CN"];

/// Client for Google's public web-translate endpoint (`translate_a/single`).
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self::with_client(client, api_url))
    }

    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    async fn query(&self, text: &str, from: &str, to: &str) -> Result<serde_json::Value, TranslateError> {
        let params = [
            ("client", "gtx"),
            ("sl", from),
            ("tl", to),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self.client.get(&self.api_url).query(&params).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;

        serde_json::from_str(&body)
            .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

/// Joins the translated segments of a `translate_a/single` response.
fn translated_text(json: &serde_json::Value) -> Option<String> {
    let segments = json.get(0)?.as_array()?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    (!text.is_empty()).then_some(text)
}

fn detected_language(json: &serde_json::Value) -> Option<&str> {
    json.get(2).and_then(|lang| lang.as_str())
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if !TARGETS.iter().any(|target| target.eq_ignore_ascii_case(&to)) {
            return Err(TranslateError::UnsupportedLanguagePair { from, to });
        }

        let json = self.query(text, &from, &to).await?;

        let translated = translated_text(&json)
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        // With "auto" the provider reports what it detected
        let from = match detected_language(&json) {
            Some(detected) if from == "auto" => detected.to_string(),
            _ => from,
        };

        tracing::debug!("Translated {} -> {}: {} chars", from, to, translated.len());

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: "google".to_string(),
        })
    }

    async fn detect_language(&self, text: &str) -> Result<LanguageCode, TranslateError> {
        let json = self.query(text, "auto", "en").await?;

        let detected = detected_language(&json)
            .ok_or_else(|| TranslateError::ApiError("No detected language".to_string()))?;

        Ok(detected.to_lowercase())
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        vec![
            ("en".to_string(), "zh-TW".to_string()),
            ("en".to_string(), "zh-CN".to_string()),
            ("zh-TW".to_string(), "en".to_string()),
            ("zh-CN".to_string(), "en".to_string()),
            ("auto".to_string(), "zh-TW".to_string()),
            ("auto".to_string(), "en".to_string()),
        ]
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
