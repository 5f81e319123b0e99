/*!
 * Currency rewriting for preserved values.
 *
 * Currency matches are rewritten when they are masked, so the value stored
 * behind a `__CURRENCY_n__` token is already the converted or re-symboled
 * string.
 */

use log::debug;

use crate::app_config::{NumberTreatment, TranslationConfig};
use super::patterns;

/// Currency normalizer for converting or re-symboling monetary values
pub struct CurrencyNormalizer;

impl CurrencyNormalizer {
    /// Rewrite a currency match according to the configured number treatment
    pub fn normalize(match_text: &str, config: &TranslationConfig) -> String {
        match config.number_treatment() {
            NumberTreatment::Preserve => match_text.to_string(),
            NumberTreatment::ConvertCurrency => Self::convert(match_text, config),
            NumberTreatment::ChangeSymbol => Self::change_symbol_only(match_text, config),
        }
    }

    /// Parse the leading amount of a match, reading `,` as the decimal separator
    ///
    /// Returns `None` for amounts such as `1.234,56` that do not parse once
    /// normalized.
    pub fn parse_amount(match_text: &str) -> Option<f64> {
        let number = patterns::first_number(match_text)?;
        number.replace(',', ".").parse::<f64>().ok()
    }

    /// Convert the amount with the configured rate and prefix the target symbol
    pub fn convert(match_text: &str, config: &TranslationConfig) -> String {
        match Self::parse_amount(match_text) {
            Some(amount) => {
                let converted = amount * config.currency_conversion_rate();
                format!("{}{:.2}", Self::canonical_symbol(config.target_currency_symbol()), converted)
            }
            None => {
                debug!("Could not parse amount in '{}', changing symbol only", match_text);
                Self::change_symbol_only(match_text, config)
            }
        }
    }

    /// Swap any recognized currency symbol or alias for the target symbol
    ///
    /// The amount is left exactly as written. A value with no symbol at all
    /// gets the target symbol in front.
    pub fn change_symbol_only(match_text: &str, config: &TranslationConfig) -> String {
        let target = Self::canonical_symbol(config.target_currency_symbol());

        let mut result = if patterns::has_currency_marker(match_text) {
            patterns::replace_currency_markers(match_text, &target)
        } else {
            match_text.to_string()
        };

        let source = config.source_currency_symbol().trim();
        if !source.is_empty() && !patterns::has_currency_marker(source) && result.contains(source) {
            result = result.replace(source, &target);
        }

        if result == match_text && !match_text.contains(target.as_str()) {
            return format!("{}{}", target, match_text.trim());
        }

        result
    }

    /// Canonical form of a configured symbol; `usd` and `$` give `$`, `eur` and `€` give `€`
    pub fn canonical_symbol(symbol: &str) -> String {
        let trimmed = symbol.trim();
        match trimmed.to_lowercase().as_str() {
            "$" | "usd" | "us$" => "$".to_string(),
            "€" | "eur" => "€".to_string(),
            _ => trimmed.to_string(),
        }
    }
}
