//! Retry budget and exponential backoff for page fetches.

use std::time::Duration;

/// Statuses that consume retry budget instead of failing immediately.
pub const RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Retry behaviour for a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    ///
    /// Default: `3`
    pub max_attempts: u32,

    /// Base delay; the wait before retry `n` is `backoff_factor * 2^(n-1)`.
    ///
    /// Default: 1 second
    pub backoff_factor: Duration,

    /// Upper bound for any single wait.
    ///
    /// Default: 120 seconds
    pub max_backoff: Duration,

    /// Response statuses that are retried.
    ///
    /// Default: `[500, 502, 503, 504]`
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_factor: Duration::from_secs(1),
            max_backoff: Duration::from_secs(120),
            retry_statuses: RETRY_STATUSES.to_vec(),
        }
    }
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait for the delay, then try again.
    Retry(Duration),
    /// Budget spent; surface the failure.
    GiveUp,
    /// The failure is not transient; surface it now.
    NotRetryable,
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn no_retries() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Whether a response status should be retried.
    #[must_use]
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Delay before retry number `retry` (1-based).
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.backoff_factor
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }

    /// Decide what follows a failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn decide(&self, attempt: u32, retryable: bool) -> RetryDecision {
        if !retryable {
            RetryDecision::NotRetryable
        } else if attempt >= self.max_attempts.max(1) {
            RetryDecision::GiveUp
        } else {
            RetryDecision::Retry(self.backoff(attempt))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff_factor, Duration::from_secs(1));
        for status in [500, 502, 503, 504] {
            assert!(policy.is_retryable_status(status));
        }
        for status in [400, 401, 403, 404, 429, 501] {
            assert!(!policy.is_retryable_status(status));
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_backoff: Duration::from_secs(3),
            ..RetryPolicy::default()
        };
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(3));
        assert_eq!(policy.backoff(40), Duration::from_secs(3));
    }

    #[test]
    fn test_decide_respects_budget() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.decide(1, true), RetryDecision::Retry(Duration::from_secs(1)));
        assert_eq!(policy.decide(2, true), RetryDecision::Retry(Duration::from_secs(2)));
        assert_eq!(policy.decide(3, true), RetryDecision::GiveUp);
        assert_eq!(policy.decide(1, false), RetryDecision::NotRetryable);
        assert_eq!(RetryPolicy::no_retries().decide(1, true), RetryDecision::GiveUp);
    }
}
