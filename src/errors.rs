/*!
 * Error types for the proptrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with translation provider APIs
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

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Map a reqwest transport error onto the matching provider error
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }

    /// Build an error from a non-success HTTP status
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

/// Fatal errors that abort a translation run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The line has no `key=value` structure or its value is empty
    #[error("Malformed line {line_number}: '{raw_text}'")]
    MalformedLine {
        /// 1-based line number
        line_number: usize,
        /// The offending line without its terminator
        raw_text: String,
    },

    /// The key was already used on an earlier line
    #[error("Duplicate key '{key}' on line {line_number}")]
    DuplicateKey {
        /// The repeated key
        key: String,
        /// 1-based line number of the second occurrence
        line_number: usize,
    },
}

impl ResolveError {
    /// Line the error refers to
    pub fn line_number(&self) -> usize {
        match self {
            Self::MalformedLine { line_number, .. } | Self::DuplicateKey { line_number, .. } => {
                *line_number
            }
        }
    }
}

/// Errors that can occur while loading a dictionary file
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The file could not be read
    #[error("Could not read dictionary {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON object of strings
    #[error("Could not parse dictionary {path}: {message}")]
    Parse { path: String, message: String },
}
