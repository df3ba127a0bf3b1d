//! Bounded retry with an optional fixed delay.
//!
//! A callback is attempted up to N times. The first success is returned
//! right away. If every attempt fails, the error from the **last** attempt is
//! returned exactly as the callback produced it: nothing is wrapped or
//! aggregated.
//!
//! Each failed attempt produces one [`LogRecord::Retry`] on the configured
//! [`LogSink`], before any wait and before the next attempt starts.
//!
//! # Quick Start
//!
//! ```rust
//! use tideline::retry::{retry, retry_with_delay};
//! use std::num::NonZeroU32;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let three = NonZeroU32::new(3).unwrap();
//!
//! let mut calls = 0;
//! let value = retry(three, || {
//!     calls += 1;
//!     let n = calls;
//!     async move { if n < 2 { Err("not yet") } else { Ok(n) } }
//! })
//! .await;
//! assert_eq!(value, Ok(2));
//!
//! let err = retry_with_delay(three, Duration::from_millis(1), || async {
//!     Err::<(), _>("down")
//! })
//! .await;
//! assert_eq!(err, Err("down"));
//! # });
//! ```
//!
//! # Custom collaborators
//!
//! [`Retry`] lets the sink and the sleep primitive be replaced, which is
//! mostly useful for tests:
//!
//! ```rust
//! use tideline::testing::{RecordingSink, RecordingSleep};
//! use tideline::{Retry, RetryPolicy};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let sink = Arc::new(RecordingSink::new());
//! let sleep = Arc::new(RecordingSleep::new());
//!
//! let result = Retry::new(RetryPolicy::new(2).unwrap().with_delay_spec("1s").unwrap())
//!     .with_sink(sink.clone())
//!     .with_sleep(sleep.clone())
//!     .run(|| async { Err::<(), _>("nope") })
//!     .await;
//!
//! assert_eq!(result, Err("nope"));
//! assert_eq!(
//!     sink.messages(),
//!     ["FAIL Attempt: 1/2, next in 1000ms", "FAIL Attempt: 2/2, next in 1000ms"]
//! );
//! assert_eq!(sleep.requested(), [Duration::from_secs(1)]);
//! # });
//! ```

mod error;
mod policy;

pub use error::RetryConfigError;
pub use policy::RetryPolicy;

use std::fmt;
use std::future::Future;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use crate::log::{default_sink, LogRecord, LogSink};
use crate::sleep::{Sleep, TokioSleep};

/// A retry executor: a [`RetryPolicy`] plus the collaborators it reports to.
#[derive(Clone)]
pub struct Retry {
    policy: RetryPolicy,
    sink: Arc<dyn LogSink>,
    sleep: Arc<dyn Sleep>,
}

impl Retry {
    /// Create an executor using the default log sink and tokio's timer.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            sink: default_sink(),
            sleep: Arc::new(TokioSleep),
        }
    }

    /// Send failed-attempt records to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Wait between attempts using `sleep`.
    pub fn with_sleep(mut self, sleep: Arc<dyn Sleep>) -> Self {
        self.sleep = sleep;
        self
    }

    /// The policy this executor runs with.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Attempt `callback` until it succeeds or the policy's attempts run out.
    ///
    /// Returns the first `Ok`, or the `Err` from the final attempt.
    pub async fn run<T, E, F, Fut>(&self, mut callback: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let total = self.policy.max_attempts();
        let mut remaining = total;

        loop {
            remaining -= 1;

            let error = match callback().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            let attempt = total - remaining;
            self.sink
                .log(&LogRecord::retry(attempt, total, self.policy.delay()));

            if remaining == 0 {
                return Err(error);
            }

            if let Some(delay) = self.policy.delay_after(attempt) {
                self.sleep.sleep(delay).await;
            }
        }
    }
}

impl fmt::Debug for Retry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Attempt `callback` up to `attempts` times, back to back.
pub async fn retry<T, E, F, Fut>(attempts: NonZeroU32, callback: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Retry::new(RetryPolicy::attempts(attempts))
        .run(callback)
        .await
}

/// Attempt `callback` up to `attempts` times, waiting `delay` after each
/// failure except the last.
pub async fn retry_with_delay<T, E, F, Fut>(
    attempts: NonZeroU32,
    delay: Duration,
    callback: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Retry::new(RetryPolicy::attempts(attempts).with_delay(delay))
        .run(callback)
        .await
}
