/*!
 * Field-by-field translation of a data row.
 *
 * For each field the orchestrator masks literals, remembers the casing,
 * asks the adapter for a translation, re-applies the casing and puts the
 * literals back. Fields are handled one at a time, in order.
 */

use log::{debug, info, warn};
use std::sync::Arc;

use crate::app_config::{Config, NumberTreatment, TranslationConfig};
use crate::errors::ConfigError;
use super::adapter::TranslationAdapter;
use super::cache::{truncate_text, CacheStats};
use super::case_style::CasePattern;
use super::currency::CurrencyNormalizer;
use super::events::{EventSink, NullSink, PipelineEvent};
use super::patterns;
use super::preservation::ElementPreserver;

/// Runs the translation pipeline over the fields of a row
pub struct Orchestrator {
    config: TranslationConfig,
    adapter: TranslationAdapter,
    sink: Arc<dyn EventSink>,
}

impl Orchestrator {
    /// Create an orchestrator from an already validated configuration
    pub fn new(config: TranslationConfig, adapter: TranslationAdapter, sink: Arc<dyn EventSink>) -> Self {
        Self { config, adapter, sink }
    }

    /// Create an orchestrator from a file configuration, validating it first
    pub fn from_config(
        config: &Config,
        adapter: TranslationAdapter,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(config.translation_config()?, adapter, sink))
    }

    /// Orchestrator that reports to nobody, for library use and tests
    pub fn silent(config: TranslationConfig, adapter: TranslationAdapter) -> Self {
        Self::new(config, adapter, Arc::new(NullSink))
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.adapter.cache().stats()
    }

    /// Translate a single field
    ///
    /// Any value with a string form is accepted. Blank fields come back as
    /// they are, and surrounding whitespace is kept around the result. A
    /// field the provider could not translate comes back unchanged.
    pub async fn translate_field<T: ToString + ?Sized>(&self, field: &T) -> String {
        let original = field.to_string();
        let core = original.trim();
        if core.is_empty() {
            return original;
        }

        let leading = &original[..original.len() - original.trim_start().len()];
        let trailing = &original[original.trim_end().len()..];

        let translated = self.translate_trimmed(core).await;
        format!("{}{}{}", leading, translated, trailing)
    }

    async fn translate_trimmed(&self, text: &str) -> String {
        if self.config.number_treatment() != NumberTreatment::Preserve && patterns::is_bare_price(text) {
            debug!("Field '{}' is a bare price", text);
            return CurrencyNormalizer::normalize(text, &self.config);
        }

        let case = CasePattern::detect(text);
        let preserved = ElementPreserver::preserve(text, &self.config);

        if !ElementPreserver::has_translatable_text(&preserved.masked) {
            debug!("Nothing to translate in '{}'", truncate_text(text, 40));
            return ElementPreserver::restore(&preserved.masked, &preserved.placeholders);
        }

        let translation = self
            .adapter
            .translate(
                &preserved.masked,
                self.config.source_language(),
                self.config.target_language(),
                self.sink.as_ref(),
            )
            .await;

        if translation.is_fallback() {
            return text.to_string();
        }

        let missing = ElementPreserver::missing_tokens(&translation.text, &preserved.placeholders);
        if !missing.is_empty() {
            warn!("Provider dropped placeholders {:?} in '{}'", missing, truncate_text(text, 40));
            self.sink.emit(PipelineEvent::Log(format!(
                "Placeholders lost during translation: {}",
                missing.join(", ")
            )));
        }

        let cased = case.apply_masked(&translation.text);
        ElementPreserver::restore(&cased, &preserved.placeholders)
    }

    /// Translate every field of a row, in order
    pub async fn translate_row<T: ToString>(&self, fields: &[T]) -> Vec<String> {
        let total = fields.len();
        info!(
            "Translating {} fields ({} -> {})",
            total,
            self.config.source_language(),
            self.config.target_language()
        );
        self.sink.emit(PipelineEvent::Status(format!("Translating {} fields", total)));

        let mut translated = Vec::with_capacity(total);
        for (index, field) in fields.iter().enumerate() {
            let original = field.to_string();
            self.sink.emit(PipelineEvent::Status(format!("Translating field {}/{}", index + 1, total)));

            let result = self.translate_field(&original).await;
            self.sink.emit(PipelineEvent::Log(format!(
                "'{}' -> '{}'",
                truncate_text(&original, 40),
                truncate_text(&result, 40)
            )));
            self.sink.emit(PipelineEvent::Progress((index + 1) as f64 * 100.0 / total as f64));

            translated.push(result);
        }

        let stats = self.cache_stats();
        debug!("Cache: {} hits, {} misses", stats.hits, stats.misses);
        self.sink.emit(PipelineEvent::Complete);
        translated
    }
}
