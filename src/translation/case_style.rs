/*!
 * Letter-case classification and re-application.
 *
 * The case style of a source field is detected before masking and applied
 * to the translated text before placeholders are restored, so restored
 * literals keep their original spelling.
 */

use serde::{Deserialize, Serialize};

use super::patterns;

/// Letter-casing style of a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CasePattern {
    /// Every cased character is uppercase
    Upper,
    /// Every cased character is lowercase
    Lower,
    /// Each word starts with a capital followed by lowercase letters
    Title,
    /// Anything else, left as the provider returned it
    Mixed,
}

impl CasePattern {
    /// Classify the casing of a text
    pub fn detect(text: &str) -> Self {
        let mut has_cased = false;
        let mut all_upper = true;
        let mut all_lower = true;

        for c in text.chars() {
            if c.is_uppercase() {
                has_cased = true;
                all_lower = false;
            } else if c.is_lowercase() {
                has_cased = true;
                all_upper = false;
            }
        }

        if !has_cased {
            return Self::Mixed;
        }
        if all_upper {
            return Self::Upper;
        }
        if all_lower {
            return Self::Lower;
        }
        if is_title(text) {
            return Self::Title;
        }
        Self::Mixed
    }

    /// Apply this style to a plain text
    pub fn apply(&self, text: &str) -> String {
        self.transform(text, false)
    }

    /// Apply this style, copying placeholder tokens through untouched
    pub fn apply_masked(&self, text: &str) -> String {
        self.transform(text, true)
    }

    // @returns: Upper-case name of the style
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
            Self::Title => "TITLE",
            Self::Mixed => "MIXED",
        }
    }

    fn transform(&self, text: &str, protect_tokens: bool) -> String {
        if *self == Self::Mixed {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut letter_seen = false;
        let mut last = 0;

        if protect_tokens {
            for token in patterns::placeholder_regex().find_iter(text) {
                self.transform_segment(&text[last..token.start()], &mut letter_seen, &mut out);
                out.push_str(token.as_str());
                // A token counts as the start of its word
                letter_seen = true;
                last = token.end();
            }
        }
        self.transform_segment(&text[last..], &mut letter_seen, &mut out);

        out
    }

    fn transform_segment(&self, segment: &str, letter_seen: &mut bool, out: &mut String) {
        for c in segment.chars() {
            match self {
                Self::Upper => out.extend(c.to_uppercase()),
                Self::Lower => out.extend(c.to_lowercase()),
                Self::Title => {
                    if c.is_whitespace() {
                        *letter_seen = false;
                        out.push(c);
                    } else if !*letter_seen && c.is_alphabetic() {
                        *letter_seen = true;
                        out.push(title_case_char(c));
                    } else if *letter_seen {
                        out.extend(c.to_lowercase());
                    } else {
                        out.push(c);
                    }
                }
                Self::Mixed => out.push(c),
            }
        }
    }
}

impl std::fmt::Display for CasePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Title-case form of a word's first letter
///
/// Digraph letters have a form distinct from their capital (`ǆ` → `ǅ`, not `Ǆ`).
/// Letters whose capital is several characters (`ß`) are kept as they are.
fn title_case_char(c: char) -> char {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => 'ǅ',
        'Ǉ' | 'ǈ' | 'ǉ' => 'ǈ',
        'Ǌ' | 'ǋ' | 'ǌ' => 'ǋ',
        'Ǳ' | 'ǲ' | 'ǳ' => 'ǲ',
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        }
    }
}

/// Whitespace-separated words each start with a capital and continue in lowercase
fn is_title(text: &str) -> bool {
    text.split_whitespace().all(|word| {
        let mut letter_seen = false;
        for c in word.chars().filter(|c| c.is_alphabetic()) {
            if !letter_seen {
                if c.is_lowercase() {
                    return false;
                }
                letter_seen = true;
            } else if c.is_uppercase() {
                return false;
            }
        }
        true
    })
}

/// Classify the casing of a text
pub fn detect_case(text: &str) -> CasePattern {
    CasePattern::detect(text)
}

/// Apply a casing style to a text
pub fn apply_case(text: &str, pattern: CasePattern) -> String {
    pattern.apply(text)
}

/// Apply a casing style to a masked text, leaving placeholder tokens alone
pub fn apply_case_masked(text: &str, pattern: CasePattern) -> String {
    pattern.apply_masked(text)
}
