/*!
 * Ollama client used as a translation provider.
 *
 * The model is asked for a bare translation and told to copy placeholder
 * tokens such as `__URL_0__` through unchanged.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::Provider;

/// Ollama client for the local generation API
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    /// Base URL of the Ollama API
    base_url: Url,
    /// Model name used for every request
    model: String,
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    stream: bool,
}

/// Generation options for the Ollama API
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub model: String,
    /// Generated text
    pub response: String,
    pub done: bool,
}

impl GenerationRequest {
    /// Create a non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: false,
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }
}

impl OllamaProvider {
    /// Create a client for a base URL and model
    pub fn new(
        base_url: impl AsRef<str>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| ProviderError::ConnectionError(format!("Invalid Ollama endpoint: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        Ok(Self {
            base_url,
            model: model.into(),
            client,
        })
    }

    fn api_url(&self, path: &str) -> Result<Url, ProviderError> {
        self.base_url
            .join(path)
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))
    }

    /// System prompt for a language pair
    pub fn system_prompt(source_language: &str, target_language: &str) -> String {
        let source = if language_utils::is_auto_detect(source_language) {
            "the detected source language".to_string()
        } else {
            language_utils::get_language_name(source_language)
                .unwrap_or_else(|_| source_language.to_string())
        };
        let target = language_utils::get_language_name(target_language)
            .unwrap_or_else(|_| target_language.to_string());

        format!(
            "You are a translator. Translate the user's text from {} to {}. \
             Reply with the translation only, without quotes or explanations. \
             Copy every token shaped like __URL_0__, __EMAIL_1__, __NUMBER_2__, \
             __CURRENCY_3__ or __LITERAL_4__ exactly as written.",
            source, target
        )
    }

    /// Send a generation request
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url("api/generate")?)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Ollama API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Get the Ollama API version
    pub async fn version(&self) -> Result<String, ProviderError> {
        let response: serde_json::Value = self
            .client
            .get(self.api_url("api/version")?)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        response["version"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::ParseError("Invalid version format in response".to_string()))
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let request = GenerationRequest::new(&self.model, text)
            .system(Self::system_prompt(source_language, target_language))
            .temperature(0.1);

        let response = self.generate(&request).await?;
        let translated = response.response.trim().to_string();
        if translated.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        debug!("Ollama ({}) translated {} chars", response.model, text.len());
        Ok(translated)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let version = self.version().await?;
        debug!("Connected to Ollama {}", version);
        Ok(())
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
