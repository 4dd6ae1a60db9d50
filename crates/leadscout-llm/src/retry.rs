//! Bounded retry with a fixed delay between attempts
//!
//! A plain attempt bound plus a constant pause, no backoff curve.

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::Error;
use crate::provider::LlmProvider;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default number of attempts (first call included)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between attempts
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Returned when every attempt failed
#[derive(Debug, Error)]
#[error("gave up after {attempts} attempt(s): {last_error}")]
pub struct RetryError<E: Display> {
    /// Number of attempts made
    pub attempts: u32,
    /// Error from the final attempt
    pub last_error: E,
}

/// Retry policy applied around a fallible async operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, at least 1
    pub max_attempts: u32,
    /// Fixed delay between consecutive attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` is clamped to at least one
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `operation` until it succeeds or the attempt bound is reached.
    ///
    /// The closure receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut>(&self, label: &str, operation: F) -> Result<T, RetryError<E>>
    where
        E: Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.run_if(label, |_| true, operation).await
    }

    /// Like [`RetryPolicy::run`], but stops at the first error `retryable`
    /// rejects.
    pub async fn run_if<T, E, P, F, Fut>(
        &self,
        label: &str,
        retryable: P,
        mut operation: F,
    ) -> Result<T, RetryError<E>>
    where
        E: Display,
        P: Fn(&E) -> bool,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(label, attempt, "succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if attempt < max_attempts && retryable(&e) => {
                    warn!(
                        label,
                        attempt,
                        max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %e,
                        "attempt failed, retrying"
                    );
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    attempt += 1;
                }
                Err(e) => {
                    warn!(label, attempts = attempt, error = %e, "giving up");
                    return Err(RetryError {
                        attempts: attempt,
                        last_error: e,
                    });
                }
            }
        }
    }
}

/// Send one completion request through `policy`.
///
/// Errors for which [`Error::is_retryable`] is false end the loop at once.
/// The response content is returned as-is for the caller to validate.
pub async fn call_with_retry(
    provider: &dyn LlmProvider,
    request: &CompletionRequest,
    policy: &RetryPolicy,
) -> Result<CompletionResponse, RetryError<Error>> {
    policy
        .run_if(provider.name(), Error::is_retryable, move |_| {
            provider.complete(request.clone())
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_first_try() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        let result: Result<u32, RetryError<String>> =
            policy.run("op", |attempt| async move { Ok(attempt) }).await;
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_recovers_on_last_attempt() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3, Duration::ZERO);

        let result = policy
            .run("op", |attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(format!("boom {attempt}"))
                    } else {
                        Ok("done")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_keeps_last_error() {
        let policy = RetryPolicy::new(2, Duration::ZERO);
        let result: Result<(), _> = policy
            .run("op", |attempt| async move { Err(format!("failure {attempt}")) })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 2);
        assert_eq!(err.last_error, "failure 2");
        assert!(err.to_string().contains("2 attempt"));
    }

    #[tokio::test]
    async fn test_call_with_retry_counts_provider_calls() {
        let provider = crate::MockProvider::new();
        provider.push_failure("reset").push_text("{}");
        let request = CompletionRequest::new("gpt-4o-mini");

        let response = call_with_retry(&provider, &request, &RetryPolicy::new(3, Duration::ZERO))
            .await
            .unwrap();

        assert_eq!(response.content, "{}");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_call_with_retry_surfaces_last_error() {
        let provider = crate::MockProvider::new();
        provider.push_failure("first").push_failure("second");
        let request = CompletionRequest::new("gpt-4o-mini");

        let err = call_with_retry(&provider, &request, &RetryPolicy::new(2, Duration::ZERO))
            .await
            .unwrap_err();

        assert_eq!(err.attempts, 2);
        assert!(err.last_error.to_string().contains("second"));
    }

    #[tokio::test]
    async fn test_missing_credential_is_not_retried() {
        let provider = crate::MockProvider::new();
        provider
            .push_error(Error::NotConfigured("OPENAI_API_KEY not set".to_string()))
            .push_text("{}");
        let request = CompletionRequest::new("gpt-4o-mini");

        let err = call_with_retry(&provider, &request, &RetryPolicy::new(3, Duration::ZERO))
            .await
            .unwrap_err();

        assert_eq!(err.attempts, 1);
        assert!(matches!(err.last_error, Error::NotConfigured(_)));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_run_if_stops_on_rejected_error() {
        let policy = RetryPolicy::new(5, Duration::ZERO);
        let result: Result<(), _> = policy
            .run_if("op", |e: &String| e != "fatal", |attempt| async move {
                Err(if attempt == 2 { "fatal".to_string() } else { "flaky".to_string() })
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.attempts, 2);
        assert_eq!(err.last_error, "fatal");
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
        assert_eq!(RetryPolicy::default().max_attempts, 3);
        assert_eq!(RetryPolicy::default().delay, Duration::from_secs(2));
    }
}
