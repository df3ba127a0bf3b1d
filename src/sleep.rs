//! The sleep primitive used between retry attempts.
//!
//! [`Sleep`] is a seam: production code uses [`TokioSleep`], while tests can
//! substitute [`RecordingSleep`](crate::testing::RecordingSleep) to observe the
//! requested delays without waiting for them.

use std::time::Duration;

use futures::future::BoxFuture;

use crate::duration::{DurationError, DurationSpec};

/// Suspends the current task for a given duration.
pub trait Sleep: Send + Sync {
    /// Return a future that completes after `duration`.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// [`Sleep`] backed by [`tokio::time::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleep;

impl Sleep for TokioSleep {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Parse `spec` and sleep for the resulting duration.
///
/// ```rust
/// # tokio_test::block_on(async {
/// tideline::sleep::sleep("5ms").await.unwrap();
/// assert!(tideline::sleep::sleep("later").await.is_err());
/// # });
/// ```
pub async fn sleep(spec: impl Into<DurationSpec>) -> Result<(), DurationError> {
    let duration = spec.into().to_duration()?;
    tokio::time::sleep(duration).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_tokio_sleep_waits() {
        let start = Instant::now();
        TokioSleep.sleep(Duration::from_millis(250)).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_parses_spec() {
        let start = Instant::now();
        sleep("2s").await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_sleep_rejects_bad_spec() {
        assert_eq!(
            sleep(-3i64).await,
            Err(DurationError::Invalid("-3".to_string()))
        );
    }
}
