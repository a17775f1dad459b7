/*!
 * Tests for language utilities
 */

use proptrans::language_utils::{
    get_language_name, language_codes_match, normalize_to_part1,
    validate_language_code, LanguageCodeType,
};

#[test]
fn test_validateLanguageCode_shouldRecognizeAllForms() {
    assert_eq!(validate_language_code("pl").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("pol").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_normalize_shouldConvertBetweenForms() {
    assert_eq!(normalize_to_part1("EN").unwrap(), "en");
    assert_eq!(normalize_to_part1("fre").unwrap(), "fr");
    assert_eq!(normalize_to_part1("pol").unwrap(), "pl");
    assert_eq!(normalize_to_part1("ger").unwrap(), "de");
}

#[test]
fn test_languageCodesMatch_shouldCompareLanguages() {
    assert!(language_codes_match("pl", "pol"));
    assert!(language_codes_match("de", "ger"));
    assert!(!language_codes_match("pl", "en"));
    assert!(!language_codes_match("pl", "nonsense"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("pl").unwrap(), "Polish");
    assert_eq!(get_language_name("eng").unwrap(), "English");
}
