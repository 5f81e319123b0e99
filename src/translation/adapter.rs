/*!
 * Translation adapter wrapping a provider with caching, retries and fallback.
 *
 * The adapter never fails: when the provider is missing or keeps failing the
 * input comes back unchanged, marked as a fallback.
 */

use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Provider;
use super::cache::{truncate_text, TranslationCache};
use super::events::{EventSink, PipelineEvent};

/// Where a translated text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOrigin {
    Cache,
    Provider,
    /// Input returned unchanged after the provider failed or was absent
    Fallback,
}

/// Outcome of one adapter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub origin: TranslationOrigin,
}

impl Translation {
    pub fn is_fallback(&self) -> bool {
        self.origin == TranslationOrigin::Fallback
    }
}

/// Provider wrapper used by the orchestrator
#[derive(Debug, Clone)]
pub struct TranslationAdapter {
    provider: Option<Arc<dyn Provider>>,
    cache: TranslationCache,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl TranslationAdapter {
    /// Create an adapter; `max_retries` counts attempts after the first one
    pub fn new(provider: Option<Arc<dyn Provider>>, max_retries: u32, retry_backoff_ms: u64) -> Self {
        Self {
            provider,
            cache: TranslationCache::new(true),
            max_retries,
            retry_backoff_ms,
        }
    }

    /// Replace the cache, e.g. to share one between adapters
    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Translate a text, consulting the cache first
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        sink: &dyn EventSink,
    ) -> Translation {
        if let Some(cached) = self.cache.get(text, source_language, target_language) {
            return Translation {
                text: cached,
                origin: TranslationOrigin::Cache,
            };
        }

        let Some(provider) = self.provider.as_deref() else {
            let error = ProviderError::Unavailable("no provider configured".to_string());
            return self.fallback(text, &error, sink);
        };

        let attempts = self.max_retries.saturating_add(1);
        let mut last_error = ProviderError::EmptyResponse;

        for attempt in 1..=attempts {
            match provider.translate(text, source_language, target_language).await {
                Ok(translated) if !translated.trim().is_empty() => {
                    self.cache.store(text, source_language, target_language, &translated);
                    return Translation {
                        text: translated,
                        origin: TranslationOrigin::Provider,
                    };
                }
                Ok(_) => last_error = ProviderError::EmptyResponse,
                Err(e) => last_error = e,
            }

            if attempt < attempts {
                let delay = self.backoff_delay(attempt);
                warn!(
                    "{} attempt {}/{} failed: {}; retrying in {}ms",
                    provider.name(),
                    attempt,
                    attempts,
                    last_error,
                    delay.as_millis()
                );
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        self.fallback(text, &last_error, sink)
    }

    /// Delay before the retry following `attempt`, doubling each time
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }

    fn fallback(&self, text: &str, error: &ProviderError, sink: &dyn EventSink) -> Translation {
        warn!("Translation failed, keeping original text: {}", error);
        debug!("Untranslated text: '{}'", truncate_text(text, 60));
        sink.emit(PipelineEvent::Log(format!(
            "Translation failed ({}); keeping original text",
            error
        )));

        Translation {
            text: text.to_string(),
            origin: TranslationOrigin::Fallback,
        }
    }
}
