/*!
 * Client for the public Google translation web endpoint.
 *
 * The endpoint answers with nested JSON arrays; the first element holds one
 * `[translated, original, ...]` entry per sentence.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Google web translation client
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    endpoint: Url,
    client: Client,
}

impl GoogleProvider {
    /// Create a client for an endpoint with a per-request timeout
    pub fn new(endpoint: impl AsRef<str>, timeout_secs: u64) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(endpoint.as_ref())
            .map_err(|e| ProviderError::ConnectionError(format!("Invalid Google endpoint: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self { endpoint, client })
    }

    // @returns: Joined sentence translations of a `translate_a/single` reply
    pub fn parse_response(body: &Value) -> Result<String, ProviderError> {
        let sentences = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Missing sentence array in response".to_string()))?;

        let translated: String = sentences
            .iter()
            .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        Ok(translated)
    }
}

#[async_trait]
impl Provider for GoogleProvider {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("client", "gtx"),
                ("sl", source_language),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Google API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let translated = Self::parse_response(&body)?;
        debug!("Google translated {} chars into {} chars", text.len(), translated.len());
        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("olá", "pt", "en").await.map(|_| ())
    }

    fn name(&self) -> &str {
        "Google"
    }
}
