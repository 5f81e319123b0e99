use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::csv_utils::CsvFile;
use crate::providers::{self, Provider};
use crate::translation::{EventSink, Orchestrator, PipelineEvent, TranslationAdapter};

// @module: Application controller for CSV translation

/// Event sink driving a terminal progress bar
struct ProgressBarSink {
    bar: ProgressBar,
}

impl ProgressBarSink {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{bar:40}] {pos}% {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("█▓▒░"));
        Self { bar }
    }
}

impl EventSink for ProgressBarSink {
    fn emit(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::Progress(percent) => self.bar.set_position(percent.clamp(0.0, 100.0).round() as u64),
            PipelineEvent::Status(message) => self.bar.set_message(message),
            PipelineEvent::Log(message) => debug!("{}", message),
            PipelineEvent::Complete => self.bar.finish_and_clear(),
            PipelineEvent::Error(message) => self.bar.abandon_with_message(message),
        }
    }
}

/// Main application controller for CSV translation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Provider shared by every run
    provider: Arc<dyn Provider>,
}

impl Controller {
    // @method: Create a controller with the provider named in the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let provider = providers::create_provider(&config.provider)
            .with_context(|| format!("Failed to create {} provider", config.provider.provider_type))?;
        Ok(Self { config, provider })
    }

    // @method: Create a controller around an existing provider
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self { config, provider })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check that the provider answers, without failing the run
    pub async fn test_connection(&self) -> bool {
        match self.provider.test_connection().await {
            Ok(()) => true,
            Err(e) => {
                warn!("{} is not reachable: {}", self.provider.name(), e);
                false
            }
        }
    }

    /// Translate the data row of a CSV file and write the three-row result
    ///
    /// Returns the path written. An existing output is only replaced with
    /// `force_overwrite`.
    pub async fn run(&self, input_file: &Path, output_file: Option<PathBuf>, force_overwrite: bool) -> Result<PathBuf> {
        self.run_with_sink(input_file, output_file, force_overwrite, Arc::new(ProgressBarSink::new()))
            .await
    }

    /// Same as `run`, reporting to the given sink
    pub async fn run_with_sink(
        &self,
        input_file: &Path,
        output_file: Option<PathBuf>,
        force_overwrite: bool,
        sink: Arc<dyn EventSink>,
    ) -> Result<PathBuf> {
        let start_time = Instant::now();

        if !input_file.is_file() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let translation_config = self.config.translation_config()?;
        let output_path =
            output_file.unwrap_or_else(|| CsvFile::output_path(input_file, translation_config.target_language()));
        if output_path.exists() && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?} (use -f to force overwrite)",
                output_path
            ));
        }

        let document = CsvFile::read(input_file)
            .with_context(|| format!("Failed to read CSV file {:?}", input_file))?;
        info!(
            "Read {:?}: {} columns, delimiter {:?}",
            input_file,
            document.data.len(),
            document.delimiter as char
        );

        let adapter = TranslationAdapter::new(
            Some(Arc::clone(&self.provider)),
            translation_config.max_retries(),
            translation_config.retry_backoff_ms(),
        );
        if let Some(name) = adapter.provider_name() {
            info!("Translating with {} ({} -> {})", name, translation_config.source_language(), translation_config.target_language());
        }

        let orchestrator = Orchestrator::new(translation_config, adapter, Arc::clone(&sink));
        let translated = orchestrator.translate_row(&document.data).await;

        let changed = document
            .data
            .iter()
            .zip(&translated)
            .filter(|(original, result)| original != result)
            .count();

        if let Err(e) = CsvFile::write(&output_path, &document, &translated, self.config.output.quote_all) {
            sink.emit(PipelineEvent::Error(e.to_string()));
            return Err(e).with_context(|| format!("Failed to write {:?}", output_path));
        }

        info!(
            "Translated {}/{} fields in {:.1}s, saved to {:?}",
            changed,
            translated.len(),
            start_time.elapsed().as_secs_f64(),
            output_path
        );

        Ok(output_path)
    }
}
