//! Upstream fetch execution with retry and backoff.
//!
//! [`Fetcher`] runs one logical fetch as a sequence of attempts: each
//! attempt invokes the caller's fetch closure under a per-attempt timeout,
//! and failures sleep a [`BackoffPolicy`] delay before the next attempt.
//! When the retry budget is exhausted the final [`TransportError`] surfaces
//! wrapped in [`MuninnError::FetchExhausted`].
//!
//! No distinction is made between retryable and non-retryable failures —
//! a 404 retries exactly like a 500 or a timeout. Deliberate policy: the
//! loop stays generic, and callers that want to fail fast on permanent
//! upstream errors can return early from their fetch closure instead.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::backoff::BackoffPolicy;
use crate::error::{MuninnError, Result, TransportError};
use crate::telemetry;

/// Default retry budget (retries after the initial attempt).
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default per-attempt timeout (15s).
const DEFAULT_PER_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(15);

/// Executes upstream calls with timeout, retry, and backoff.
///
/// Worst-case wall time for one `call()` is bounded:
/// `sum(base_delay * 2^i for i in 0..max_retries)` of sleeping plus
/// `(max_retries + 1) * per_attempt_timeout` of attempting.
///
/// ```rust
/// # use muninn::{BackoffPolicy, Fetcher};
/// # use std::time::Duration;
/// let fetcher = Fetcher::new(
///     BackoffPolicy::new(Duration::from_millis(500)),
///     2,
///     Duration::from_secs(15),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Fetcher {
    policy: BackoffPolicy,
    max_retries: u32,
    per_attempt_timeout: Duration,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self {
            policy: BackoffPolicy::default(),
            max_retries: DEFAULT_MAX_RETRIES,
            per_attempt_timeout: DEFAULT_PER_ATTEMPT_TIMEOUT,
        }
    }
}

impl Fetcher {
    /// Create a fetcher with the given backoff policy, retry budget, and
    /// per-attempt timeout.
    pub fn new(policy: BackoffPolicy, max_retries: u32, per_attempt_timeout: Duration) -> Self {
        Self {
            policy,
            max_retries,
            per_attempt_timeout,
        }
    }

    /// Run one logical fetch to completion or exhaustion.
    ///
    /// Invokes `do_fetch` up to `max_retries + 1` times, each under the
    /// per-attempt timeout. The first success returns immediately; the
    /// final failure returns [`MuninnError::FetchExhausted`] wrapping the
    /// last attempt's error.
    pub async fn call<T, F, Fut>(&self, do_fetch: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = std::result::Result<T, TransportError>>,
    {
        let mut attempt = 0u32;
        loop {
            let error = match tokio::time::timeout(self.per_attempt_timeout, do_fetch()).await {
                Ok(Ok(value)) => {
                    metrics::counter!(telemetry::FETCHES_TOTAL, "status" => "ok").increment(1);
                    return Ok(value);
                }
                Ok(Err(e)) => e,
                Err(_) => TransportError::Timeout(self.per_attempt_timeout),
            };

            if attempt == self.max_retries {
                metrics::counter!(telemetry::FETCHES_TOTAL, "status" => "exhausted").increment(1);
                return Err(MuninnError::FetchExhausted {
                    attempts: attempt + 1,
                    source: error,
                });
            }

            let delay = self.policy.delay_for_attempt(attempt);
            warn!(
                attempt = attempt + 1,
                max_retries = self.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "retrying after upstream failure"
            );
            metrics::counter!(telemetry::RETRIES_TOTAL).increment(1);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
