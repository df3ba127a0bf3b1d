//! Error types for retry configuration.

use crate::duration::DurationError;

/// Error returned when a [`RetryPolicy`](super::RetryPolicy) cannot be built.
///
/// This only covers configuration mistakes. Failures of the retried operation
/// itself are returned to the caller unchanged.
///
/// # Examples
///
/// ```rust
/// use tideline::{RetryConfigError, RetryPolicy};
///
/// match RetryPolicy::new(0) {
///     Err(RetryConfigError::ZeroAttempts) => {}
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryConfigError {
    /// The attempt count was zero, so the operation would never run.
    ZeroAttempts,
    /// The delay could not be parsed.
    Duration(DurationError),
}

impl From<DurationError> for RetryConfigError {
    fn from(err: DurationError) -> Self {
        Self::Duration(err)
    }
}

impl std::fmt::Display for RetryConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroAttempts => write!(f, "retry count must be at least 1"),
            Self::Duration(e) => write!(f, "invalid retry delay: {}", e),
        }
    }
}

impl std::error::Error for RetryConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ZeroAttempts => None,
            Self::Duration(e) => Some(e),
        }
    }
}
