//! Retry policy configuration.

use std::num::NonZeroU32;
use std::time::Duration;

use super::error::RetryConfigError;
use crate::duration::DurationSpec;

/// How many times to attempt an operation and how long to wait in between.
///
/// Policies are plain data: they describe retry behavior but don't execute it.
/// The attempt count includes the first try, so `RetryPolicy::new(3)` means
/// one initial attempt plus up to two more.
///
/// # Examples
///
/// ```rust
/// use tideline::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3).unwrap().with_delay(Duration::from_millis(100));
///
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.delay_after(1), Some(Duration::from_millis(100)));
/// assert_eq!(policy.delay_after(2), Some(Duration::from_millis(100)));
/// assert_eq!(policy.delay_after(3), None); // nothing left to wait for
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: NonZeroU32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy allowing `attempts` attempts and no delay.
    ///
    /// Fails with [`RetryConfigError::ZeroAttempts`] when `attempts` is zero.
    ///
    /// ```rust
    /// use tideline::{RetryConfigError, RetryPolicy};
    ///
    /// assert!(RetryPolicy::new(1).is_ok());
    /// assert_eq!(RetryPolicy::new(0), Err(RetryConfigError::ZeroAttempts));
    /// ```
    pub fn new(attempts: u32) -> Result<Self, RetryConfigError> {
        NonZeroU32::new(attempts)
            .map(Self::attempts)
            .ok_or(RetryConfigError::ZeroAttempts)
    }

    /// Create a policy allowing `attempts` attempts and no delay.
    pub fn attempts(attempts: NonZeroU32) -> Self {
        Self {
            attempts,
            delay: Duration::ZERO,
        }
    }

    /// Wait `delay` after each failed attempt that is not the last.
    ///
    /// A zero delay means no waiting.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Like [`with_delay`](Self::with_delay), parsing a human-readable duration.
    ///
    /// ```rust
    /// use tideline::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::new(5).unwrap().with_delay_spec("2s").unwrap();
    /// assert_eq!(policy.delay(), Some(Duration::from_secs(2)));
    ///
    /// assert!(RetryPolicy::new(5).unwrap().with_delay_spec("eventually").is_err());
    /// ```
    pub fn with_delay_spec(self, spec: impl Into<DurationSpec>) -> Result<Self, RetryConfigError> {
        let delay = spec.into().to_duration()?;
        Ok(self.with_delay(delay))
    }

    /// Total number of attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.attempts.get()
    }

    /// The configured delay, or `None` when attempts run back to back.
    pub fn delay(&self) -> Option<Duration> {
        Some(self.delay).filter(|d| !d.is_zero())
    }

    /// The wait after failed attempt number `attempt` (1-indexed).
    ///
    /// Returns `None` when no wait should happen: either no delay is
    /// configured, or `attempt` was the final one.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts() {
            return None;
        }
        self.delay()
    }
}

#[cfg(test)]
mod policy_tests {
    use super::*;
    use crate::duration::DurationError;

    #[test]
    fn test_new_rejects_zero() {
        assert_eq!(RetryPolicy::new(0), Err(RetryConfigError::ZeroAttempts));
    }

    #[test]
    fn test_no_delay_by_default() {
        let policy = RetryPolicy::new(4).unwrap();
        assert_eq!(policy.max_attempts(), 4);
        assert_eq!(policy.delay(), None);
        assert_eq!(policy.delay_after(1), None);
    }

    #[test]
    fn test_zero_delay_is_no_delay() {
        let policy = RetryPolicy::new(2).unwrap().with_delay(Duration::ZERO);
        assert_eq!(policy.delay(), None);
    }

    #[test]
    fn test_constant_delay_until_last_attempt() {
        let policy = RetryPolicy::new(3)
            .unwrap()
            .with_delay(Duration::from_millis(50));

        assert_eq!(policy.delay_after(1), Some(Duration::from_millis(50)));
        assert_eq!(policy.delay_after(2), Some(Duration::from_millis(50)));
        assert_eq!(policy.delay_after(3), None);
        assert_eq!(policy.delay_after(4), None);
    }

    #[test]
    fn test_single_attempt_never_waits() {
        let policy = RetryPolicy::new(1)
            .unwrap()
            .with_delay(Duration::from_secs(1));
        assert_eq!(policy.delay_after(1), None);
    }

    #[test]
    fn test_delay_spec_errors_are_wrapped() {
        let err = RetryPolicy::new(2)
            .unwrap()
            .with_delay_spec(-1i64)
            .unwrap_err();
        assert_eq!(
            err,
            RetryConfigError::Duration(DurationError::Invalid("-1".to_string()))
        );
    }

    #[test]
    fn test_policy_is_copy() {
        let policy = RetryPolicy::new(2).unwrap();
        let copy = policy;
        assert_eq!(policy, copy);
    }
}
