/*!
 * Tests for language code utilities
 */

use csvtrad::errors::ConfigError;
use csvtrad::language_utils::{
    get_language_name, is_auto_detect, language_codes_match, strip_display_name, validate_language_code,
};

#[test]
fn test_validateLanguageCode_withValidCodes_shouldReturnLowercase() {
    assert_eq!(validate_language_code("PT").unwrap(), "pt");
    assert_eq!(validate_language_code(" eng ").unwrap(), "eng");
    assert_eq!(validate_language_code("fre").unwrap(), "fre");
}

#[test]
fn test_validateLanguageCode_withInvalidCodes_shouldFail() {
    assert!(matches!(validate_language_code(""), Err(ConfigError::InvalidLanguage(_))));
    assert!(matches!(validate_language_code("english"), Err(ConfigError::InvalidLanguage(_))));
    assert!(validate_language_code("q").is_err());
}

#[test]
fn test_validateLanguageCode_withRegionSubtag_shouldKeepRegion() {
    assert_eq!(validate_language_code("zh-CN").unwrap(), "zh-CN");
    assert_eq!(validate_language_code("PT-br").unwrap(), "pt-br");
    assert!(validate_language_code("zh-").is_err());
    assert!(validate_language_code("zh-C!").is_err());
    assert!(validate_language_code("klingon-CN").is_err());
}

#[test]
fn test_languageCodesMatch_withRegions_shouldCompareRegionToo() {
    assert!(language_codes_match("zh-CN", "zho-cn"));
    assert!(!language_codes_match("zh-CN", "zh-TW"));
    assert!(!language_codes_match("pt", "pt-BR"));
}

#[test]
fn test_languageCodesMatch_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("pt", "POR"));
    assert!(language_codes_match("fre", "fr"));
    assert!(!language_codes_match("pt", "es"));
    assert!(!language_codes_match("pt", "??"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("pt").unwrap(), "Portuguese");
    assert_eq!(get_language_name("auto").unwrap(), "Auto-detected");
    assert_eq!(get_language_name("zh-tw").unwrap(), "Chinese (TW)");
    assert!(get_language_name("zzzz").is_err());
}

#[test]
fn test_stripDisplayName_shouldKeepOnlyCode() {
    assert_eq!(strip_display_name("pt - Português"), "pt");
    assert_eq!(strip_display_name("  en  "), "en");
    assert_eq!(strip_display_name("es"), "es");
}

#[test]
fn test_isAutoDetect_shouldIgnoreCase() {
    assert!(is_auto_detect("auto"));
    assert!(is_auto_detect(" AUTO "));
    assert!(!is_auto_detect("pt"));
}
