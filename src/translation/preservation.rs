/*!
 * Literal element preservation for translated text.
 *
 * URLs, e-mail addresses, numbers and currency values are replaced by
 * placeholder tokens before the text goes to a provider and put back
 * afterwards. Tokens look like `__URL_0__`; a single counter is shared by all
 * categories of one field, so every token of a field is unique. Input text
 * that already looks like a token is itself masked as a `LITERAL` token, so
 * restoring never confuses it with a real placeholder.
 *
 * Overlaps are resolved on spans of the original text: categories are taken
 * in priority order (URL, e-mail, currency, number) and a match is accepted
 * only if it does not overlap a span accepted before it. A number inside a
 * URL is therefore covered by the URL token alone.
 */

use log::debug;
use regex::Captures;
use std::collections::HashMap;
use std::ops::Range;

use crate::app_config::{NumberTreatment, TranslationConfig};
use super::currency::CurrencyNormalizer;
use super::patterns::{self, PatternKind, PatternMatch};

/// Category of a preserved element, used in the token name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderCategory {
    Url,
    Email,
    Currency,
    Number,
    /// Input text that happens to be shaped like a token
    Literal,
}

impl PlaceholderCategory {
    /// Upper-case label used inside tokens
    pub fn label(&self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Email => "EMAIL",
            Self::Currency => "CURRENCY",
            Self::Number => "NUMBER",
            Self::Literal => "LITERAL",
        }
    }

    /// Build the token for a counter value
    pub fn token(&self, counter: usize) -> String {
        format!("__{}_{}__", self.label(), counter)
    }
}

/// Ordered mapping from placeholder token to the value it stands for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, token: String, value: String) {
        self.entries.push((token, value));
    }

    /// Value stored for a token
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, value)| value.as_str())
    }

    /// Tokens in insertion order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(token, _)| token.as_str())
    }

    /// Stored values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, value)| value.as_str())
    }

    /// Token/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(token, value)| (token.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of masking one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreservedText {
    /// Text with every preserved element replaced by its token
    pub masked: String,
    /// Tokens and the values they restore to
    pub placeholders: PlaceholderMap,
}

/// A span of the original text that will be replaced by a token
struct AcceptedSpan {
    span: Range<usize>,
    token: String,
}

/// Collects non-overlapping spans and assigns tokens
#[derive(Default)]
struct SpanSelection {
    accepted: Vec<AcceptedSpan>,
    placeholders: PlaceholderMap,
    tokens_by_value: HashMap<(PlaceholderCategory, String), String>,
    counter: usize,
}

impl SpanSelection {
    fn overlaps(&self, span: &Range<usize>) -> bool {
        self.accepted
            .iter()
            .any(|a| a.span.start < span.end && span.start < a.span.end)
    }

    /// Accept a match unless it overlaps an earlier one; `value` is what the token restores to
    fn offer(&mut self, category: PlaceholderCategory, found: &PatternMatch<'_>, value: String) {
        if self.overlaps(&found.span) {
            debug!("Skipping {} '{}' already covered by another placeholder", category.label(), found.text);
            return;
        }

        let key = (category, found.text.to_string());
        let token = match self.tokens_by_value.get(&key) {
            Some(token) => token.clone(),
            None => {
                let token = category.token(self.counter);
                self.counter += 1;
                self.placeholders.insert(token.clone(), value);
                self.tokens_by_value.insert(key, token.clone());
                token
            }
        };

        self.accepted.push(AcceptedSpan {
            span: found.span.clone(),
            token,
        });
    }

    fn offer_verbatim(&mut self, category: PlaceholderCategory, matches: &[PatternMatch<'_>]) {
        for found in matches {
            self.offer(category, found, found.text.to_string());
        }
    }

    fn into_preserved(mut self, text: &str) -> PreservedText {
        self.accepted.sort_by_key(|a| a.span.start);

        let mut masked = String::with_capacity(text.len());
        let mut last = 0;
        for accepted in &self.accepted {
            masked.push_str(&text[last..accepted.span.start]);
            masked.push_str(&accepted.token);
            last = accepted.span.end;
        }
        masked.push_str(&text[last..]);

        PreservedText {
            masked,
            placeholders: self.placeholders,
        }
    }
}

/// Element preserver for keeping literals out of translation
pub struct ElementPreserver;

impl ElementPreserver {
    /// Replace preserved elements with placeholder tokens
    pub fn preserve(text: &str, config: &TranslationConfig) -> PreservedText {
        let mut selection = SpanSelection::default();

        selection.offer_verbatim(
            PlaceholderCategory::Literal,
            &patterns::find_matches(PatternKind::Placeholder, text),
        );

        if config.preserve_urls() {
            selection.offer_verbatim(PlaceholderCategory::Url, &patterns::find_matches(PatternKind::Url, text));
        }

        if config.preserve_emails() {
            selection.offer_verbatim(PlaceholderCategory::Email, &patterns::find_matches(PatternKind::Email, text));
        }

        match config.number_treatment() {
            NumberTreatment::Preserve => {
                if config.preserve_numbers() {
                    selection.offer_verbatim(
                        PlaceholderCategory::Number,
                        &patterns::find_matches(PatternKind::Number, text),
                    );
                }
            }
            NumberTreatment::ConvertCurrency | NumberTreatment::ChangeSymbol => {
                // Currency values are stored already rewritten
                for found in patterns::find_matches(PatternKind::Currency, text) {
                    if patterns::has_currency_marker(found.text) {
                        let value = CurrencyNormalizer::normalize(found.text, config);
                        selection.offer(PlaceholderCategory::Currency, &found, value);
                    }
                }
                selection.offer_verbatim(
                    PlaceholderCategory::Number,
                    &patterns::find_matches(PatternKind::Number, text),
                );
            }
        }

        selection.into_preserved(text)
    }

    /// Put the preserved values back in place of their tokens
    ///
    /// Tokens a provider lower-cased or padded with a space are still recognized.
    /// Token-shaped text that is not in the map is left untouched.
    pub fn restore(text: &str, placeholders: &PlaceholderMap) -> String {
        if placeholders.is_empty() {
            return text.to_string();
        }

        patterns::placeholder_regex()
            .replace_all(text, |caps: &Captures<'_>| {
                let token = canonical_token(&caps[1], &caps[2]);
                match placeholders.get(&token) {
                    Some(value) => value.to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    /// Tokens of the map that no longer appear in the text
    pub fn missing_tokens(text: &str, placeholders: &PlaceholderMap) -> Vec<String> {
        let present: Vec<String> = patterns::placeholder_regex()
            .captures_iter(text)
            .map(|caps| canonical_token(&caps[1], &caps[2]))
            .collect();

        placeholders
            .tokens()
            .filter(|token| !present.iter().any(|p| p.as_str() == *token))
            .map(str::to_string)
            .collect()
    }

    /// Whether anything besides tokens, digits and punctuation is left to translate
    pub fn has_translatable_text(masked: &str) -> bool {
        patterns::placeholder_regex()
            .split(masked)
            .any(|segment| segment.chars().any(char::is_alphabetic))
    }
}

/// Normalize a matched token to its canonical `__CATEGORY_n__` form
fn canonical_token(category: &str, counter: &str) -> String {
    format!("__{}_{}__", category.to_uppercase(), counter)
}
