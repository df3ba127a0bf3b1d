//! Structured log records and the sinks that render them.
//!
//! The retry executor does not print anything itself. It hands a
//! [`LogRecord`] to a [`LogSink`], and the sink decides how (and whether) to
//! show it. The stock sinks honor the ambient
//! [`verbose`](crate::context::Settings::verbose) setting.

use std::fmt;
use std::io::{self, Stderr, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::context;

/// A structured event produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum LogRecord {
    /// A retried callback failed.
    Retry {
        /// Which attempt failed (1-indexed).
        attempt: u32,
        /// Total number of attempts allowed.
        total: u32,
        /// Wait before the next attempt, when a delay is configured.
        #[cfg_attr(feature = "serde", serde(rename = "delay_ms", with = "delay_ms"))]
        delay: Option<Duration>,
    },
}

impl LogRecord {
    /// Build a [`LogRecord::Retry`], dropping a zero delay.
    pub fn retry(attempt: u32, total: u32, delay: Option<Duration>) -> Self {
        Self::Retry {
            attempt,
            total,
            delay: delay.filter(|d| !d.is_zero()),
        }
    }

    /// Short machine-readable name of the record kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Retry { .. } => "retry",
        }
    }

    /// Human-readable summary of the record.
    ///
    /// ```rust
    /// use tideline::log::LogRecord;
    /// use std::time::Duration;
    ///
    /// let record = LogRecord::retry(1, 3, Some(Duration::from_millis(500)));
    /// assert_eq!(record.message(), "FAIL Attempt: 1/3, next in 500ms");
    ///
    /// let record = LogRecord::retry(3, 3, None);
    /// assert_eq!(record.message(), "FAIL Attempt: 3/3");
    /// ```
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retry {
                attempt,
                total,
                delay,
            } => {
                write!(f, "FAIL Attempt: {}/{}", attempt, total)?;
                if let Some(d) = delay {
                    write!(f, ", next in {}ms", ceil_millis(*d))?;
                }
                Ok(())
            }
        }
    }
}

/// Whole milliseconds, rounding a sub-millisecond remainder up so a
/// non-zero delay never reads as `0ms`.
fn ceil_millis(d: Duration) -> u128 {
    d.as_nanos().div_ceil(1_000_000)
}

#[cfg(feature = "serde")]
mod delay_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(delay: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        delay
            .map(|d| u64::try_from(super::ceil_millis(d)).unwrap_or(u64::MAX))
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}

/// Consumer of [`LogRecord`]s.
pub trait LogSink: Send + Sync {
    /// Handle one record.
    fn log(&self, record: &LogRecord);
}

/// Writes each record's message as one line to `W` while `verbose` is on.
#[derive(Debug)]
pub struct WriterSink<W> {
    output: Mutex<W>,
}

/// [`WriterSink`] on stderr.
pub type StderrSink = WriterSink<Stderr>;

impl WriterSink<Stderr> {
    /// A sink writing to stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl Default for WriterSink<Stderr> {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write + Send> WriterSink<W> {
    /// A sink writing to `output`.
    pub fn new(output: W) -> Self {
        Self {
            output: Mutex::new(output),
        }
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn log(&self, record: &LogRecord) {
        if !context::current().verbose {
            return;
        }
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(_err) = writeln!(output, "{}", record).and_then(|_| output.flush()) {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %_err, "failed to write log record");
        }
    }
}

/// Emits each record as a `tracing` event while `verbose` is on.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl LogSink for TracingSink {
    fn log(&self, record: &LogRecord) {
        if !context::current().verbose {
            return;
        }
        match record {
            LogRecord::Retry { attempt, total, .. } => {
                tracing::warn!(kind = record.kind(), attempt, total, "{}", record);
            }
        }
    }
}

/// The sink used when none is configured.
///
/// [`TracingSink`] with the `tracing` feature, [`StderrSink`] otherwise.
pub fn default_sink() -> Arc<dyn LogSink> {
    #[cfg(feature = "tracing")]
    let sink: Arc<dyn LogSink> = Arc::new(TracingSink);
    #[cfg(not(feature = "tracing"))]
    let sink: Arc<dyn LogSink> = Arc::new(StderrSink::stderr());
    sink
}
