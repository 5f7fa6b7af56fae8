//! Exponential backoff delay calculation.
//!
//! [`BackoffPolicy`] is a pure, deterministic mapping from attempt index to
//! the delay slept before the next retry: `base_delay * 2^attempt`.
//!
//! There is no jitter in the baseline policy. Concurrent callers retrying
//! against the same failing upstream will synchronise their retry waves
//! (thundering herd). Callers that need jitter can wrap
//! [`delay_for_attempt()`](BackoffPolicy::delay_for_attempt) and perturb the
//! result before sleeping.

use std::time::Duration;

/// Default base delay before the first retry (500ms).
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// Pure exponential backoff policy.
///
/// ```rust
/// # use muninn::BackoffPolicy;
/// # use std::time::Duration;
/// let policy = BackoffPolicy::new(Duration::from_millis(500));
/// assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(500));
/// assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(2000));
/// ```
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Base delay multiplied by `2^attempt`.
    pub base_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl BackoffPolicy {
    /// Create a policy with the given base delay.
    pub fn new(base_delay: Duration) -> Self {
        Self { base_delay }
    }

    /// Calculate the delay for a given attempt number (0-indexed).
    ///
    /// `base_delay * 2^attempt`, saturating at `Duration::MAX` rather than
    /// overflowing for absurd attempt counts.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}
