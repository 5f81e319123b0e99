use isolang::Language;

use crate::errors::ConfigError;

/// Language utilities for the language codes handed to translation providers
///
/// Codes arrive from the command line or the configuration file, sometimes
/// with a display name attached (`"pt - Português"`). They are reduced to the
/// bare code, validated against ISO 639-1 / ISO 639-2 and compared so that
/// `pt` and `por` are recognised as the same language. A region subtag such as
/// the `CN` of `zh-CN` is kept and takes part in comparisons.

/// Pseudo-code accepted as a source language, asking the provider to detect it
pub const AUTO_DETECT: &str = "auto";

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Strip a display-name suffix: `"pt - Português"` becomes `"pt"`
pub fn strip_display_name(value: &str) -> &str {
    match value.split_once(" - ") {
        Some((code, _)) => code.trim(),
        None => value.trim(),
    }
}

/// Check whether a code asks the provider to auto-detect the language
pub fn is_auto_detect(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO_DETECT)
}

/// Split a code into its language subtag and an optional region subtag
fn split_region(code: &str) -> (&str, Option<&str>) {
    match code.trim().split_once('-') {
        Some((primary, region)) => (primary, Some(region)),
        None => (code.trim(), None),
    }
}

fn is_valid_region(region: &str) -> bool {
    (2..=8).contains(&region.len()) && region.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Resolve a code to its ISO language, accepting 639-1, 639-2/T and 639-2/B forms
fn resolve(code: &str) -> Option<Language> {
    let (primary, _) = split_region(code);
    let normalized = primary.to_lowercase();

    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(part2b, _)| *part2b == normalized)
                .map_or(normalized.as_str(), |(_, part2t)| *part2t);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate a language code, returning it trimmed with the language subtag lowercased
///
/// A region subtag is kept as written: `zh-CN` stays `zh-CN`.
pub fn validate_language_code(code: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidLanguage(code.to_string());
    let (primary, region) = split_region(code);
    let primary = primary.to_lowercase();
    if primary.is_empty() || resolve(&primary).is_none() {
        return Err(invalid());
    }

    match region {
        None => Ok(primary),
        Some(region) if is_valid_region(region) => Ok(format!("{}-{}", primary, region)),
        Some(_) => Err(invalid()),
    }
}

/// Check if two language codes represent the same language and region
///
/// `pt` and `por` match; `zh-CN` and `zh-TW` do not, nor do `pt` and `pt-BR`.
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    let (_, region1) = split_region(code1);
    let (_, region2) = split_region(code2);
    let same_region = match (region1, region2) {
        (None, None) => true,
        (Some(r1), Some(r2)) => r1.eq_ignore_ascii_case(r2),
        _ => false,
    };

    match (resolve(code1), resolve(code2)) {
        (Some(lang1), Some(lang2)) => lang1 == lang2 && same_region,
        _ => false,
    }
}

/// Get the English language name for a code
pub fn get_language_name(code: &str) -> Result<String, ConfigError> {
    if is_auto_detect(code) {
        return Ok("Auto-detected".to_string());
    }

    let name = resolve(code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| ConfigError::InvalidLanguage(code.to_string()))?;

    match split_region(code) {
        (_, Some(region)) => Ok(format!("{} ({})", name, region.to_uppercase())),
        (_, None) => Ok(name),
    }
}
