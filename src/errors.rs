/*!
 * Error types for the csvtrad application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Only configuration errors are fatal to a translation run. Provider failures
 * are retried and then absorbed by the translation adapter, and currency parse
 * failures never surface as errors at all.
 */

use thiserror::Error;

/// Errors that can occur when calling a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The provider answered but returned no text
    #[error("Provider returned an empty translation")]
    EmptyResponse,

    /// No provider is configured for this run
    #[error("Translation provider unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors raised while building or validating a translation configuration.
///
/// These are reported before any field is processed.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// A required value is empty
    #[error("Missing required configuration value: {0}")]
    MissingField(&'static str),

    /// A language code is not a known ISO 639 code
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// Source and target language designate the same language
    #[error("Source and target languages must differ (both are '{0}')")]
    SameLanguage(String),

    /// Conversion rate is zero, negative or not finite
    #[error("Currency conversion rate must be a positive number, got {0}")]
    InvalidConversionRate(f64),

    /// Currency handling is enabled without a target symbol
    #[error("A target currency symbol is required when numbers are treated as currency")]
    MissingCurrencySymbol,

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Errors that can occur while reading or writing CSV files
#[derive(Error, Debug)]
pub enum CsvError {
    /// Underlying I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file needs a header row and a data row
    #[error("CSV file must contain at least 2 rows (header + data), found {found}")]
    NotEnoughRows {
        /// Number of rows actually read
        found: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from CSV handling
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
