use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::errors::ConfigError;
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and deriving the immutable per-run `TranslationConfig`.
/// Represents the application configuration as stored in `conf.json`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code, a display-name suffix like `"pt - Português"` is allowed
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code, a display-name suffix is allowed
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Which literal elements are kept out of translation
    #[serde(default)]
    pub preservation: PreservationConfig,

    /// Currency handling
    #[serde(default)]
    pub currency: CurrencyConfig,

    /// Translation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// CSV output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How numbers and currency values found in a field are handled
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NumberTreatment {
    /// Numbers are kept verbatim
    #[default]
    Preserve,
    /// Currency values are converted with the configured rate
    ConvertCurrency,
    /// Only the currency symbol is swapped
    ChangeSymbol,
}

impl NumberTreatment {
    /// Whether currency-looking values are rewritten
    pub fn handles_currency(&self) -> bool {
        !matches!(self, Self::Preserve)
    }

    // @returns: Kebab-case identifier as used in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::ConvertCurrency => "convert-currency",
            Self::ChangeSymbol => "change-symbol",
        }
    }
}

impl std::fmt::Display for NumberTreatment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NumberTreatment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "preserve" => Ok(Self::Preserve),
            "convert-currency" | "convert" => Ok(Self::ConvertCurrency),
            "change-symbol" | "symbol" => Ok(Self::ChangeSymbol),
            _ => Err(ConfigError::Parse(format!("Invalid number treatment: {}", s))),
        }
    }
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    // @provider: Google Translate public endpoint
    #[default]
    Google,
    // @provider: Ollama
    Ollama,
}

impl ProviderKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Ollama => "Ollama",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            _ => Err(ConfigError::Parse(format!("Invalid provider type: {}", s))),
        }
    }
}

/// Provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type", default)]
    pub provider_type: ProviderKind,

    // @field: Service URL, empty means the provider default
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Model name (Ollama only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of retries after a failed provider call
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff base in milliseconds, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ProviderKind) -> Self {
        Self {
            provider_type,
            endpoint: String::new(),
            model: String::new(),
            timeout_secs: default_timeout_secs(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }

    /// Get the endpoint, falling back to the provider default
    pub fn get_endpoint(&self) -> String {
        if !self.endpoint.is_empty() {
            return self.endpoint.clone();
        }

        match self.provider_type {
            ProviderKind::Google => default_google_endpoint(),
            ProviderKind::Ollama => default_ollama_endpoint(),
        }
    }

    /// Get the model, falling back to the provider default
    pub fn get_model(&self) -> String {
        if !self.model.is_empty() {
            return self.model.clone();
        }

        match self.provider_type {
            ProviderKind::Google => String::new(),
            ProviderKind::Ollama => default_ollama_model(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(ProviderKind::default())
    }
}

/// Flags selecting which literal elements are masked before translation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreservationConfig {
    #[serde(default = "default_true")]
    pub preserve_urls: bool,

    #[serde(default = "default_true")]
    pub preserve_emails: bool,

    #[serde(default = "default_true")]
    pub preserve_numbers: bool,
}

impl Default for PreservationConfig {
    fn default() -> Self {
        Self {
            preserve_urls: true,
            preserve_emails: true,
            preserve_numbers: true,
        }
    }
}

/// Currency settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrencyConfig {
    /// How numbers and currency values are treated
    #[serde(default)]
    pub number_treatment: NumberTreatment,

    /// Symbol used by the source data
    #[serde(default = "default_source_currency_symbol")]
    pub source_symbol: String,

    /// Symbol written into the translation
    #[serde(default = "default_target_currency_symbol")]
    pub target_symbol: String,

    /// Multiplier applied when converting values
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: f64,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            number_treatment: NumberTreatment::default(),
            source_symbol: default_source_currency_symbol(),
            target_symbol: default_target_currency_symbol(),
            conversion_rate: default_conversion_rate(),
        }
    }
}

/// CSV output settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OutputConfig {
    /// Quote every output field instead of only those that need it
    #[serde(default)]
    pub quote_all: bool,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to the `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "pt".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_true() -> bool {
    true
}

fn default_source_currency_symbol() -> String {
    "R$".to_string()
}

fn default_target_currency_symbol() -> String {
    "$".to_string()
}

fn default_conversion_rate() -> f64 {
    1.0
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.translation_config().map(|_| ())
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Derive the immutable per-run translation configuration
    pub fn translation_config(&self) -> Result<TranslationConfig, ConfigError> {
        TranslationConfig::builder(&self.source_language, &self.target_language)
            .preserve_urls(self.preservation.preserve_urls)
            .preserve_emails(self.preservation.preserve_emails)
            .preserve_numbers(self.preservation.preserve_numbers)
            .number_treatment(self.currency.number_treatment)
            .source_currency_symbol(&self.currency.source_symbol)
            .target_currency_symbol(&self.currency.target_symbol)
            .currency_conversion_rate(self.currency.conversion_rate)
            .max_retries(self.provider.retry_count)
            .retry_backoff_ms(self.provider.retry_backoff_ms)
            .build()
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            preservation: PreservationConfig::default(),
            currency: CurrencyConfig::default(),
            provider: ProviderConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

/// Immutable configuration of one translation run.
///
/// Built once, validated on construction, and only read afterwards by the
/// preservation, currency and orchestration code.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationConfig {
    source_language: String,
    target_language: String,
    preserve_urls: bool,
    preserve_emails: bool,
    preserve_numbers: bool,
    number_treatment: NumberTreatment,
    source_currency_symbol: String,
    target_currency_symbol: String,
    currency_conversion_rate: f64,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl TranslationConfig {
    /// Start building a configuration for a language pair
    pub fn builder(source_language: &str, target_language: &str) -> TranslationConfigBuilder {
        TranslationConfigBuilder::new(source_language, target_language)
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn preserve_urls(&self) -> bool {
        self.preserve_urls
    }

    pub fn preserve_emails(&self) -> bool {
        self.preserve_emails
    }

    pub fn preserve_numbers(&self) -> bool {
        self.preserve_numbers
    }

    pub fn number_treatment(&self) -> NumberTreatment {
        self.number_treatment
    }

    pub fn source_currency_symbol(&self) -> &str {
        &self.source_currency_symbol
    }

    pub fn target_currency_symbol(&self) -> &str {
        &self.target_currency_symbol
    }

    pub fn currency_conversion_rate(&self) -> f64 {
        self.currency_conversion_rate
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_backoff_ms(&self) -> u64 {
        self.retry_backoff_ms
    }
}

/// Builder for `TranslationConfig`; `build` performs all validation
#[derive(Debug, Clone)]
pub struct TranslationConfigBuilder {
    config: TranslationConfig,
}

impl TranslationConfigBuilder {
    fn new(source_language: &str, target_language: &str) -> Self {
        Self {
            config: TranslationConfig {
                source_language: source_language.to_string(),
                target_language: target_language.to_string(),
                preserve_urls: true,
                preserve_emails: true,
                preserve_numbers: true,
                number_treatment: NumberTreatment::Preserve,
                source_currency_symbol: default_source_currency_symbol(),
                target_currency_symbol: default_target_currency_symbol(),
                currency_conversion_rate: default_conversion_rate(),
                max_retries: default_retry_count(),
                retry_backoff_ms: default_retry_backoff_ms(),
            },
        }
    }

    pub fn preserve_urls(mut self, value: bool) -> Self {
        self.config.preserve_urls = value;
        self
    }

    pub fn preserve_emails(mut self, value: bool) -> Self {
        self.config.preserve_emails = value;
        self
    }

    pub fn preserve_numbers(mut self, value: bool) -> Self {
        self.config.preserve_numbers = value;
        self
    }

    pub fn number_treatment(mut self, value: NumberTreatment) -> Self {
        self.config.number_treatment = value;
        self
    }

    pub fn source_currency_symbol(mut self, value: &str) -> Self {
        self.config.source_currency_symbol = value.to_string();
        self
    }

    pub fn target_currency_symbol(mut self, value: &str) -> Self {
        self.config.target_currency_symbol = value.to_string();
        self
    }

    pub fn currency_conversion_rate(mut self, value: f64) -> Self {
        self.config.currency_conversion_rate = value;
        self
    }

    pub fn max_retries(mut self, value: u32) -> Self {
        self.config.max_retries = value;
        self
    }

    pub fn retry_backoff_ms(mut self, value: u64) -> Self {
        self.config.retry_backoff_ms = value;
        self
    }

    /// Validate and freeze the configuration
    pub fn build(self) -> Result<TranslationConfig, ConfigError> {
        let mut config = self.config;

        let source = language_utils::strip_display_name(&config.source_language).to_string();
        let target = language_utils::strip_display_name(&config.target_language).to_string();

        if source.is_empty() {
            return Err(ConfigError::MissingField("source_language"));
        }
        if target.is_empty() {
            return Err(ConfigError::MissingField("target_language"));
        }

        config.source_language = if language_utils::is_auto_detect(&source) {
            language_utils::AUTO_DETECT.to_string()
        } else {
            language_utils::validate_language_code(&source)?
        };
        config.target_language = language_utils::validate_language_code(&target)?;

        if config.source_language == config.target_language
            || language_utils::language_codes_match(&config.source_language, &config.target_language)
        {
            return Err(ConfigError::SameLanguage(config.target_language));
        }

        if !config.currency_conversion_rate.is_finite() || config.currency_conversion_rate <= 0.0 {
            return Err(ConfigError::InvalidConversionRate(config.currency_conversion_rate));
        }

        config.target_currency_symbol = config.target_currency_symbol.trim().to_string();
        if config.number_treatment.handles_currency() && config.target_currency_symbol.is_empty() {
            return Err(ConfigError::MissingCurrencySymbol);
        }

        Ok(config)
    }
}
