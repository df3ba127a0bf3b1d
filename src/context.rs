//! Ambient output settings with scoped overrides.
//!
//! Some settings (whether log lines are printed, whether progress output is
//! shown) apply to everything a program does rather than to one call. They
//! live here as a [`Settings`] value with two layers:
//!
//! - a **process default**, used outside of any scope, and
//! - a **scoped copy**, installed by [`within`] for the duration of a future.
//!
//! [`update`] always mutates the innermost layer. Leaving a scope discards
//! its copy, so whatever was in effect before is back in place on every exit
//! path: completion, error, panic, or the future being dropped.
//!
//! # Example
//!
//! ```rust
//! use tideline::context::{self, within};
//!
//! # tokio_test::block_on(async {
//! let outer = context::current().verbose;
//!
//! within(async {
//!     context::update(|s| s.verbose = false);
//!     assert!(!context::current().verbose);
//!
//!     within(async {
//!         context::update(|s| s.verbose = true);
//!         assert!(context::current().verbose);
//!     })
//!     .await;
//!
//!     // The inner scope restored exactly what the outer scope had.
//!     assert!(!context::current().verbose);
//! })
//! .await;
//!
//! assert_eq!(context::current().verbose, outer);
//! # });
//! ```
//!
//! Scopes follow the task, not the thread: a future passed to
//! `tokio::spawn` starts from the process default.

use std::cell::RefCell;
use std::future::Future;
use std::sync::{PoisonError, RwLock};

/// Process-wide output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Print informational log records (e.g. failed retry attempts).
    pub verbose: bool,
    /// Suppress progress output such as spinner frames.
    pub quiet: bool,
}

impl Settings {
    /// Settings in effect when nothing has been configured.
    pub const DEFAULT: Settings = Settings {
        verbose: true,
        quiet: false,
    };
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static PROCESS: RwLock<Settings> = RwLock::new(Settings::DEFAULT);

tokio::task_local! {
    static SCOPED: RefCell<Settings>;
}

/// The settings in effect for the caller.
pub fn current() -> Settings {
    SCOPED
        .try_with(|cell| *cell.borrow())
        .unwrap_or_else(|_| *PROCESS.read().unwrap_or_else(PoisonError::into_inner))
}

/// Modify the settings in effect for the caller.
///
/// Inside [`within`] this changes only the scoped copy; outside any scope it
/// changes the process default. `f` works on a copy, so it may call
/// [`current`] itself.
pub fn update<F>(f: F)
where
    F: FnOnce(&mut Settings),
{
    let mut settings = current();
    f(&mut settings);

    if SCOPED.try_with(|cell| *cell.borrow_mut() = settings).is_err() {
        *PROCESS.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }
}

/// Run `fut` with its own copy of the current settings.
///
/// Changes made through [`update`] while `fut` runs are invisible outside of
/// it and are discarded when it finishes.
pub async fn within<F>(fut: F) -> F::Output
where
    F: Future,
{
    SCOPED.scope(RefCell::new(current()), fut).await
}

/// Synchronous counterpart of [`within`].
pub fn within_sync<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    SCOPED.sync_scope(RefCell::new(current()), f)
}
