/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with a tagged translation
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::fail_first(n)` - Fails the first `n` calls, then succeeds
 * - `MockProvider::intermittent(n)` - Fails every `n`th call
 *
 * Every call is counted and recorded so tests can assert how often the
 * external service would have been hit.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// A request seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    /// The text to translate
    pub text: String,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Fails the first `failures` calls, then succeeds
    FailFirst { failures: usize },
    /// Fails intermittently (every Nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

/// Mock provider for testing translation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Requests in arrival order, shared between clones
    requests: Arc<Mutex<Vec<MockRequest>>>,
    /// Canned answers by input text
    canned: HashMap<String, String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            canned: HashMap::new(),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that fails `failures` times before recovering
    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    /// Answer `text` with `translation` instead of the tagged default
    pub fn with_translation(mut self, text: impl Into<String>, translation: impl Into<String>) -> Self {
        self.canned.insert(text.into(), translation.into());
        self
    }

    /// Number of calls made so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of the requests made so far
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// The default answer for a successful call
    pub fn tagged(text: &str, target_language: &str) -> String {
        format!("[{}] {}", target_language, text)
    }

    fn answer(&self, request: &MockRequest) -> String {
        self.canned
            .get(&request.text)
            .cloned()
            .unwrap_or_else(|| Self::tagged(&request.text, &request.target_language))
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        let request = MockRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        };
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match self.behavior {
            MockBehavior::Working => Ok(self.answer(&request)),

            MockBehavior::FailFirst { failures } => {
                if count < failures {
                    Err(ProviderError::ConnectionError(format!(
                        "Simulated outage (request #{})",
                        count + 1
                    )))
                } else {
                    Ok(self.answer(&request))
                }
            }

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(self.answer(&request))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),
        }
    }
}
