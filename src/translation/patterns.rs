/*!
 * Pattern library used to classify and extract literal substrings.
 *
 * Every recognizer is compiled once per process and shared read-only.
 * Matching is a pure text -> span operation.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

/// Web addresses, with or without a scheme; trailing sentence punctuation is left out
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:https?://|www\.)[^\s<>"]*[^\s<>".,;:!?)\]'}]"#).expect("Invalid URL regex")
});

/// E-mail addresses
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("Invalid email regex")
});

/// Digit runs grouped by `.` or `,`, also when glued to letters or symbols (`20R$`, `USD20`)
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:[.,]\d+)*").expect("Invalid number regex")
});

/// A number with an optional currency marker before or after it, spaced or glued (`R$ 20`, `20R$`, `USD20`)
static CURRENCY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:(?:R\$|US\$|\$|€|\b(?:BRL|USD|EUR))\s?\d+(?:[.,]\d+)*|\b\d+(?:[.,]\d+)*)(?:\s*(?:R\$|US\$|\$|€|(?:BRL|USD|EUR|reais|real)\b))?",
    )
    .expect("Invalid currency regex")
});

/// Currency symbols, or whole letter runs that may be a currency alias
static CURRENCY_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)R\$|US\$|\$|€|\p{L}+").expect("Invalid currency marker regex")
});

/// Letter runs read as currency; they may touch digits (`USD20`) but not other letters
const CURRENCY_ALIASES: [&str; 5] = ["brl", "usd", "eur", "reais", "real"];

/// Typographic and ASCII quotes
static QUOTES_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["“”'‘’`]"#).expect("Invalid quotes regex")
});

/// Sentence punctuation
static PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?;:,\-—–…]").expect("Invalid punctuation regex")
});

/// Placeholder tokens, tolerant of the spacing and lower-casing some providers introduce
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)__\s?(URL|EMAIL|NUMBER|CURRENCY|LITERAL)\s?_\s?(\d+)\s?__").expect("Invalid placeholder regex")
});

/// A whole field that is just a number
static BARE_PRICE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(?:[.,]\d+)*$").expect("Invalid bare price regex")
});

/// Maximum length of a field still treated as a bare price
const BARE_PRICE_MAX_LEN: usize = 20;

/// The recognizers available to the preserver and classifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Url,
    Email,
    Number,
    Currency,
    Quotes,
    Punctuation,
    /// Text already shaped like a placeholder token
    Placeholder,
}

impl PatternKind {
    /// The compiled regex behind this recognizer
    pub fn regex(&self) -> &'static Regex {
        match self {
            Self::Url => &URL_REGEX,
            Self::Email => &EMAIL_REGEX,
            Self::Number => &NUMBER_REGEX,
            Self::Currency => &CURRENCY_REGEX,
            Self::Quotes => &QUOTES_REGEX,
            Self::Punctuation => &PUNCTUATION_REGEX,
            Self::Placeholder => &PLACEHOLDER_REGEX,
        }
    }
}

/// A recognized substring and its byte range in the searched text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    pub kind: PatternKind,
    pub span: Range<usize>,
    pub text: &'t str,
}

/// Find every non-overlapping match of one recognizer, left to right
pub fn find_matches(kind: PatternKind, text: &str) -> Vec<PatternMatch<'_>> {
    kind.regex()
        .find_iter(text)
        .map(|m| PatternMatch {
            kind,
            span: m.range(),
            text: m.as_str(),
        })
        .collect()
}

/// Check whether a recognizer matches anywhere in the text
pub fn contains(kind: PatternKind, text: &str) -> bool {
    kind.regex().is_match(text)
}

/// The first amount inside a text, if any, even when glued to a marker (`USD20`)
pub fn first_number(text: &str) -> Option<&str> {
    NUMBER_REGEX.find(text).map(|m| m.as_str())
}

fn is_currency_marker(candidate: &str) -> bool {
    candidate.contains('$')
        || candidate == "€"
        || CURRENCY_ALIASES.contains(&candidate.to_lowercase().as_str())
}

/// Whether a text carries a currency symbol or alias, not just digits
pub fn has_currency_marker(text: &str) -> bool {
    CURRENCY_MARKER_REGEX
        .find_iter(text)
        .any(|m| is_currency_marker(m.as_str()))
}

/// Replace every currency symbol or alias in a text, leaving other words alone
pub fn replace_currency_markers(text: &str, replacement: &str) -> String {
    CURRENCY_MARKER_REGEX
        .replace_all(text, |caps: &Captures<'_>| {
            let found = &caps[0];
            if is_currency_marker(found) {
                replacement.to_string()
            } else {
                found.to_string()
            }
        })
        .into_owned()
}

/// The placeholder token regex; group 1 is the category, group 2 the counter
pub fn placeholder_regex() -> &'static Regex {
    &PLACEHOLDER_REGEX
}

/// Whether a whole field looks like a price: only digits and separators, short
pub fn is_bare_price(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.len() < BARE_PRICE_MAX_LEN && BARE_PRICE_REGEX.is_match(trimmed)
}
