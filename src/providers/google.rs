use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Client for the unauthenticated Google translate web endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Base URL of the endpoint
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Translation request for the web endpoint
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    /// The text to translate
    pub text: String,
    /// Source language code, `auto` for detection
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

/// Translation response from the web endpoint
#[derive(Debug, Clone)]
pub struct TranslateResponse {
    /// The translated text
    pub text: String,
    /// Source language the endpoint detected, when reported
    pub detected_language: Option<String>,
}

impl GoogleTranslate {
    /// Create a new client for the given endpoint
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: endpoint.into().trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }
}

/// Parse the endpoint's nested-array response body.
///
/// The body is `[[["<translated>", "<original>", ...], ...], null, "<lang>", ...]`;
/// the translation is the concatenation of the first element of every segment.
pub fn parse_translate_response(value: &Value) -> Result<TranslateResponse, ProviderError> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ParseError("Missing segment array in response".to_string()))?;

    let mut text = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            text.push_str(piece);
        }
    }

    if text.is_empty() && !segments.is_empty() {
        return Err(ProviderError::ParseError(
            "Response segments carried no translated text".to_string(),
        ));
    }

    let detected_language = value.get(2).and_then(Value::as_str).map(str::to_string);

    Ok(TranslateResponse { text, detected_language })
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = TranslateRequest;
    type Response = TranslateResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = format!("{}/translate_a/single", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", request.source_language.as_str()),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimitExceeded(message));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        parse_translate_response(&body)
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}
