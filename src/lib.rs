//! # Tideline
//!
//! Two small primitives for scripts that call slow or flaky async actions:
//!
//! - [`retry`](retry::retry): attempt an action up to N times, optionally
//!   waiting a fixed delay between failures, and return the first success
//!   or the last error.
//! - [`spinner`](spinner::spinner): show an animated progress line while an
//!   action runs, and always stop the animation when it settles.
//!
//! ## Quick Example
//!
//! ```rust
//! use tideline::{retry::retry_with_delay, spinner::spinner_with_title};
//! use std::num::NonZeroU32;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let calls = AtomicU32::new(0);
//! let body = spinner_with_title("downloading", || {
//!     retry_with_delay(NonZeroU32::new(3).unwrap(), Duration::from_millis(10), || {
//!         let ok = calls.fetch_add(1, Ordering::SeqCst) == 1;
//!         async move {
//!             if ok {
//!                 Ok("payload")
//!             } else {
//!                 Err("connection reset")
//!             }
//!         }
//!     })
//! })
//! .await;
//!
//! assert_eq!(body, Ok("payload"));
//! # });
//! ```
//!
//! Log output is controlled by the ambient [`context::Settings`]; see the
//! [`context`] module for scoping rules.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod context;
pub mod duration;
pub mod log;
pub mod retry;
pub mod sleep;
pub mod spinner;
pub mod testing;

// Re-exports
pub use context::Settings;
pub use duration::{DurationError, DurationSpec};
pub use log::{LogRecord, LogSink};
pub use retry::{Retry, RetryConfigError, RetryPolicy};
pub use spinner::Spinner;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::{within, Settings};
    pub use crate::duration::DurationSpec;
    pub use crate::retry::{retry, retry_with_delay, Retry, RetryPolicy};
    pub use crate::spinner::{spinner, spinner_with_title, Spinner};
}
