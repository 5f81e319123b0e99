/*!
 * Translation providers.
 *
 * - Google: public web translation endpoint
 * - Ollama: local LLM server
 * - Mock: scripted behaviours for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::{ProviderConfig, ProviderKind};
use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// Providers translate one piece of text at a time and may fail; retrying and
/// falling back is left to the caller.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Translate a text between two language codes
    ///
    /// # Arguments
    /// * `text` - Text to translate, possibly containing placeholder tokens
    /// * `source_language` - Source language code, or `auto`
    /// * `target_language` - Target language code
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Check that the provider can be reached
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Human readable provider name
    fn name(&self) -> &str;
}

/// Build the provider described by the configuration
pub fn create_provider(config: &ProviderConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let provider: Arc<dyn Provider> = match config.provider_type {
        ProviderKind::Google => Arc::new(google::GoogleProvider::new(
            config.get_endpoint(),
            config.timeout_secs,
        )?),
        ProviderKind::Ollama => Arc::new(ollama::OllamaProvider::new(
            config.get_endpoint(),
            config.get_model(),
            config.timeout_secs,
        )?),
    };
    Ok(provider)
}

pub mod google;
pub mod mock;
pub mod ollama;
