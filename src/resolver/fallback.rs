/*!
 * Machine translation with bounded retries.
 *
 * Failures never escape this module: once the attempts are used up the
 * caller gets the original text back as a `Degraded` outcome.
 */

use std::time::Duration;

use log::{debug, warn};

use crate::providers::Provider;

/// How often and how patiently the provider is retried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Fixed wait between two attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Policy with the given attempt count and backoff
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

/// Result of translating one value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackOutcome {
    /// The provider answered
    Translated {
        text: String,
        attempts: u32,
    },
    /// Every attempt failed; `original` is passed through
    Degraded {
        original: String,
        attempts: u32,
        last_error: String,
    },
}

/// Progress of one value through the retry loop
enum Attempt {
    Attempting(u32),
    Success { text: String, attempts: u32 },
    Degraded { last_error: String, attempts: u32 },
}

/// Calls a provider under a retry policy
#[derive(Debug)]
pub struct FallbackTranslator<'p> {
    provider: &'p dyn Provider,
    policy: RetryPolicy,
}

impl<'p> FallbackTranslator<'p> {
    pub fn new(provider: &'p dyn Provider, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Translate `text`, retrying on any provider error.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> FallbackOutcome {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut state = Attempt::Attempting(1);

        loop {
            state = match state {
                Attempt::Attempting(n) => {
                    match self
                        .provider
                        .translate(text, source_language, target_language)
                        .await
                    {
                        Ok(translated) => Attempt::Success {
                            text: translated,
                            attempts: n,
                        },
                        Err(e) if n < max_attempts => {
                            warn!(
                                "{} attempt {}/{} for '{}' failed: {}",
                                self.provider.name(),
                                n,
                                max_attempts,
                                text,
                                e
                            );
                            if !self.policy.backoff.is_zero() {
                                tokio::time::sleep(self.policy.backoff).await;
                            }
                            Attempt::Attempting(n + 1)
                        }
                        Err(e) => Attempt::Degraded {
                            last_error: e.to_string(),
                            attempts: n,
                        },
                    }
                }
                Attempt::Success { text: translated, attempts } => {
                    debug!("Translated '{}' -> '{}' in {} attempt(s)", text, translated, attempts);
                    return FallbackOutcome::Translated {
                        text: translated,
                        attempts,
                    };
                }
                Attempt::Degraded { last_error, attempts } => {
                    return FallbackOutcome::Degraded {
                        original: text.to_string(),
                        attempts,
                        last_error,
                    };
                }
            };
        }
    }
}
