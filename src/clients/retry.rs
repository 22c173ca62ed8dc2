//! Retry policy for catalog requests.
//!
//! Failed attempts are retried with exponential backoff: the wait before
//! attempt `k + 1` is `base_delay * 2^k`, where attempts are numbered from 0.

use std::time::Duration;

use crate::error::ConfigError;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Retry configuration for [`HttpClient::fetch`](crate::clients::HttpClient::fetch).
///
/// At most `max_retries + 1` attempts are made. Timeouts, transport failures,
/// 5xx and 429 responses are retried; every other status is handed back to
/// the caller on the first attempt.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use storefront_catalog::clients::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
/// assert_eq!(policy.delay_for(2), Duration::from_millis(4000));
/// assert!(RetryPolicy::is_retryable_status(503));
/// assert!(!RetryPolicy::is_retryable_status(404));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each later retry.
    pub base_delay: Duration,
    /// Upper bound on a single attempt.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    #[must_use]
    pub const fn no_retries(timeout: Duration) -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            timeout,
        }
    }

    /// Total number of attempts this policy allows.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Backoff delay to wait after the failed attempt numbered `attempt`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .map_or(Duration::MAX, |factor| self.base_delay.saturating_mul(factor))
    }

    /// Returns `true` for statuses worth another attempt (5xx and 429).
    #[must_use]
    pub const fn is_retryable_status(code: u16) -> bool {
        code == 429 || (code >= 500 && code < 600)
    }

    /// Validates the policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetryPolicy`] if the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
