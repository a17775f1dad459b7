/*!
 * Tests for error types and conversions
 */

use proptrans::errors::{DictionaryError, ProviderError, ResolveError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "Service unavailable".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("Service unavailable"));
}

#[test]
fn test_providerError_fromStatus_shouldClassifyCommonCodes() {
    assert!(matches!(
        ProviderError::from_status(429, "slow down"),
        ProviderError::RateLimitExceeded(_)
    ));
    assert!(matches!(
        ProviderError::from_status(403, "forbidden"),
        ProviderError::AuthenticationError(_)
    ));
    assert!(matches!(
        ProviderError::from_status(500, "boom"),
        ProviderError::ApiError { status_code: 500, .. }
    ));
}

#[test]
fn test_resolveError_malformedLine_shouldDisplayLineAndText() {
    let error = ResolveError::MalformedLine {
        line_number: 2,
        raw_text: "noequals".to_string(),
    };
    assert_eq!(format!("{}", error), "Malformed line 2: 'noequals'");
    assert_eq!(error.line_number(), 2);
}

#[test]
fn test_resolveError_duplicateKey_shouldDisplayKeyAndLine() {
    let error = ResolveError::DuplicateKey {
        key: "a".to_string(),
        line_number: 3,
    };
    assert_eq!(format!("{}", error), "Duplicate key 'a' on line 3");
}

#[test]
fn test_dictionaryError_parse_shouldDisplayPathAndMessage() {
    let error = DictionaryError::Parse {
        path: "custom_dict.json".to_string(),
        message: "expected value".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("custom_dict.json"));
    assert!(display.contains("expected value"));
}

#[test]
fn test_dictionaryError_read_shouldKeepIoSource() {
    let error = DictionaryError::Read {
        path: "missing.json".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
    };
    assert!(format!("{}", error).contains("File not found"));
    assert!(std::error::Error::source(&error).is_some());
}
