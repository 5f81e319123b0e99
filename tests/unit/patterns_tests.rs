/*!
 * Tests for the pattern recognizers
 */

use csvtrad::translation::patterns::{self, PatternKind};

#[test]
fn test_findMatches_withUrl_shouldReturnWholeAddress() {
    let text = "Visit https://example.com/menu?id=1 today";
    let matches = patterns::find_matches(PatternKind::Url, text);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text, "https://example.com/menu?id=1");
    assert_eq!(&text[matches[0].span.clone()], matches[0].text);
}

#[test]
fn test_findMatches_withWwwUrl_shouldMatchWithoutScheme() {
    let matches = patterns::find_matches(PatternKind::Url, "see WWW.Example.com");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text, "WWW.Example.com");
}

#[test]
fn test_findMatches_withEmail_shouldMatchAddress() {
    let matches = patterns::find_matches(PatternKind::Email, "Email: test@example.com, Valor: 123.45");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text, "test@example.com");
}

#[test]
fn test_findMatches_withGroupedNumbers_shouldKeepGroupsTogether() {
    let matches = patterns::find_matches(PatternKind::Number, "1.234,56 and 7");
    let texts: Vec<&str> = matches.iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["1.234,56", "7"]);
}

#[test]
fn test_findMatches_withCurrencyMarkers_shouldIncludeMarker() {
    let cases = [
        ("Preço R$ 20 hoje", "R$ 20"),
        ("custa 20 reais", "20 reais"),
        ("only US$ 5", "US$ 5"),
        ("total $10", "$10"),
        ("total 30 EUR", "30 EUR"),
        ("total €7,50", "€7,50"),
    ];

    for (text, expected) in cases {
        let matches = patterns::find_matches(PatternKind::Currency, text);
        assert_eq!(matches.len(), 1, "one match expected in '{}'", text);
        assert_eq!(matches[0].text, expected);
    }
}

#[test]
fn test_findMatches_withMarkerGluedToAmount_shouldIncludeMarker() {
    let cases = [
        ("Preço 20R$ agora", "20R$"),
        ("custa 20BRL", "20BRL"),
        ("USD20 ok", "USD20"),
        ("sai por 15reais", "15reais"),
    ];

    for (text, expected) in cases {
        let matches = patterns::find_matches(PatternKind::Currency, text);
        assert_eq!(matches.len(), 1, "one match expected in '{}'", text);
        assert_eq!(matches[0].text, expected);
        assert!(patterns::has_currency_marker(matches[0].text));
    }

    let numbers = patterns::find_matches(PatternKind::Number, "Preço 20R$ e USD30");
    let texts: Vec<&str> = numbers.iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["20", "30"]);
}

#[test]
fn test_replaceCurrencyMarkers_shouldOnlyTouchMarkers() {
    assert_eq!(patterns::replace_currency_markers("20R$", "€"), "20€");
    assert_eq!(patterns::replace_currency_markers("USD20", "€"), "€20");
    assert_eq!(patterns::replace_currency_markers("realmente 20 reais", "$"), "realmente 20 $");
}

#[test]
fn test_findMatches_withBareNumber_shouldStillMatchCurrencyPattern() {
    let matches = patterns::find_matches(PatternKind::Currency, "Mesa 12");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text, "12");
    assert!(!patterns::has_currency_marker(matches[0].text));
}

#[test]
fn test_hasCurrencyMarker_shouldRequireWholeWordAliases() {
    assert!(patterns::has_currency_marker("20 reais"));
    assert!(patterns::has_currency_marker("BRL 20"));
    assert!(!patterns::has_currency_marker("realmente 20"));
}

#[test]
fn test_firstNumber_shouldReturnLeadingAmount() {
    assert_eq!(patterns::first_number("R$ 1.234,56"), Some("1.234,56"));
    assert_eq!(patterns::first_number("sem valor"), None);
    assert_eq!(patterns::first_number("USD20"), Some("20"));
}

#[test]
fn test_isBarePrice_withVariousFields_shouldClassifyCorrectly() {
    assert!(patterns::is_bare_price("100"));
    assert!(patterns::is_bare_price("  100,50 "));
    assert!(patterns::is_bare_price("1.234.567"));
    assert!(!patterns::is_bare_price("100 reais"));
    assert!(!patterns::is_bare_price("R$ 100"));
    assert!(!patterns::is_bare_price("123456789012345678901"));
}

#[test]
fn test_contains_withQuotesAndPunctuation_shouldDetectThem() {
    assert!(patterns::contains(PatternKind::Quotes, "ele disse “olá”"));
    assert!(!patterns::contains(PatternKind::Quotes, "sem aspas"));
    assert!(patterns::contains(PatternKind::Punctuation, "Olá!"));
}

#[test]
fn test_placeholderRegex_shouldTolerateProviderMangling() {
    let regex = patterns::placeholder_regex();
    for token in ["__URL_0__", "__url_0__", "__ URL_0 __", "__Number_12__"] {
        assert!(regex.is_match(token), "'{}' should be recognized", token);
    }
    assert!(regex.is_match("__LITERAL_3__"));
    assert!(!regex.is_match("__PHONE_1__"));
}
