//
//  campus-client
//  api/retry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Bounded retry with linear backoff.
//!
//! Retry is driven purely by transport-level failure: any
//! [`ApiResult::Failure`] is retried, any [`ApiResult::Success`] is returned
//! as-is no matter what it contains. After a failed attempt `n` the policy
//! waits `delay * n` before attempt `n + 1`.
//!
//! ```rust
//! use std::time::Duration;
//! use campus_client::api::{with_retry, ApiResult, RetryPolicy};
//!
//! # async fn example() {
//! let fetch = with_retry(
//!     || async { ApiResult::success("pong") },
//!     RetryPolicy::new(3, Duration::from_millis(200)),
//! );
//! assert_eq!(fetch.call().await.into_data(), Some("pong"));
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::common::ApiResult;

/// Retry bounds.
///
/// `max_retries` counts total attempts, so the default policy calls the
/// operation at most three times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Zero behaves like one.
    pub max_retries: u32,
    /// Base delay; attempt `n` is followed by a wait of `delay * n`.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy.
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// A policy that makes a single attempt.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Effective number of attempts.
    pub fn attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Wait after failed attempt `attempt` (1-indexed).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.delay.saturating_mul(attempt)
    }

    /// Runs `operation` until it succeeds or the attempts are used up.
    ///
    /// Returns the first success, or the last failure unchanged.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let attempts = self.attempts();
        let mut attempt = 1;

        loop {
            let result = operation().await;
            let Some(error) = result.error() else {
                return result;
            };

            if attempt >= attempts {
                if attempts > 1 {
                    warn!(attempts, error = %error, "giving up after retries");
                }
                return result;
            }

            let wait = self.delay_for(attempt);
            debug!(attempt, attempts, ?wait, error = %error, "attempt failed, retrying");
            tokio::time::sleep(wait).await;
            attempt += 1;
        }
    }
}

/// An operation decorated with a retry policy.
///
/// Built by [`with_retry`]; each [`call`](Self::call) runs the full policy.
#[derive(Debug, Clone)]
pub struct Retrying<F> {
    operation: F,
    policy: RetryPolicy,
}

impl<F> Retrying<F> {
    /// The policy applied on each call.
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Runs the decorated operation under the policy.
    pub async fn call<T, Fut>(&self) -> ApiResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        self.policy.run(|| (self.operation)()).await
    }
}

/// Wraps a zero-argument async operation in `policy`.
pub fn with_retry<F>(operation: F, policy: RetryPolicy) -> Retrying<F> {
    Retrying { operation, policy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ApiError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn fail(attempt: u32) -> ApiResult<&'static str> {
        ApiResult::failure(ApiError::network(format!("attempt {attempt} failed")))
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_failing_runs_exactly_max_retries() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));

        let result = policy
            .run(move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                fail(n)
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(result, fail(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_at_first_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::default();

        let result = policy
            .run(move || async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n == 2 {
                    ApiResult::success("second")
                } else {
                    fail(n)
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(result, ApiResult::success("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_is_linear() {
        let start = Instant::now();
        let policy = RetryPolicy::new(3, Duration::from_millis(1000));

        let _ = policy.run(move || async move { fail(0) }).await;

        // 1s after attempt 1, 2s after attempt 2, nothing after the last.
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_payload_never_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: ApiResult<Vec<u8>> = RetryPolicy::default()
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                ApiResult::success(Vec::new())
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.into_data(), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_zero_retries_still_attempts_once() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let _ = RetryPolicy::new(0, Duration::ZERO)
            .run(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                fail(1)
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decorator_reusable() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let op = with_retry(
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                fail(1)
            },
            RetryPolicy::new(2, Duration::from_millis(10)),
        );

        assert!(op.call().await.is_failure());
        assert!(op.call().await.is_failure());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
