//! Test doubles for the crate's collaborators.
//!
//! These make retry and spinner behavior observable without real timers or a
//! terminal:
//!
//! - [`RecordingSink`] keeps every [`LogRecord`] it receives
//! - [`RecordingSleep`] notes requested delays and returns immediately
//! - [`SharedBuffer`] is a cloneable in-memory [`Write`] target
//!
//! # Example
//!
//! ```rust
//! use tideline::testing::{RecordingSink, RecordingSleep};
//! use tideline::{Retry, RetryPolicy};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let sink = Arc::new(RecordingSink::new());
//! let retry = Retry::new(RetryPolicy::new(2).unwrap())
//!     .with_sink(sink.clone())
//!     .with_sleep(Arc::new(RecordingSleep::new()));
//!
//! let _ = retry.run(|| async { Err::<(), _>(()) }).await;
//! assert_eq!(sink.records().len(), 2);
//! # });
//! ```

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;

use crate::log::{LogRecord, LogSink};
use crate::sleep::Sleep;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A [`LogSink`] that stores records, ignoring the ambient verbosity.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All records received so far, in order.
    pub fn records(&self) -> Vec<LogRecord> {
        lock(&self.records).clone()
    }

    /// The rendered message of every record received so far.
    pub fn messages(&self) -> Vec<String> {
        lock(&self.records).iter().map(LogRecord::message).collect()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, record: &LogRecord) {
        lock(&self.records).push(record.clone());
    }
}

/// A [`Sleep`] that records each requested duration and completes at once.
#[derive(Debug, Default)]
pub struct RecordingSleep {
    requested: Mutex<Vec<Duration>>,
}

impl RecordingSleep {
    /// Create a sleeper with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every duration passed to [`Sleep::sleep`], in order.
    pub fn requested(&self) -> Vec<Duration> {
        lock(&self.requested).clone()
    }
}

impl Sleep for RecordingSleep {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        lock(&self.requested).push(duration);
        Box::pin(std::future::ready(()))
    }
}

/// An in-memory writer whose clones share one buffer.
///
/// ```rust
/// use tideline::testing::SharedBuffer;
/// use std::io::Write;
///
/// let buffer = SharedBuffer::new();
/// let mut writer = buffer.clone();
/// write!(writer, "hello").unwrap();
/// assert_eq!(buffer.contents(), "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.bytes)).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.bytes).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
