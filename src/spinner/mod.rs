//! An animated progress indicator around a slow async action.
//!
//! While the action runs, a frame such as `  ⠹ loading` is written to the
//! output every tick, overwriting itself in place with a carriage return.
//! The whole run happens inside a [`context::within`] scope with `verbose`
//! turned off, so log lines from the action don't tear through the
//! animation. When the action settles the timer is stopped first, then the
//! scope is left, then the action's output is returned untouched.
//!
//! # Example
//!
//! ```rust
//! use tideline::spinner::spinner_with_title;
//!
//! # tokio_test::block_on(async {
//! let answer = spinner_with_title("thinking", || async { 42 }).await;
//! assert_eq!(answer, 42);
//! # });
//! ```
//!
//! Fallible actions keep their error:
//!
//! ```rust
//! use tideline::spinner::spinner;
//!
//! # tokio_test::block_on(async {
//! let result = spinner(|| async { Err::<(), _>("offline") }).await;
//! assert_eq!(result, Err("offline"));
//! # });
//! ```

mod ticker;

pub use ticker::FRAMES;

use std::future::Future;
use std::io::{self, Stderr, Write};
use std::time::Duration;

use crate::context;
use ticker::FrameTicker;

/// Time between frames when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Spinner configuration: title, frame interval, and output target.
///
/// # Examples
///
/// ```rust
/// use tideline::spinner::Spinner;
/// use tideline::testing::SharedBuffer;
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let output = SharedBuffer::new();
///
/// let value = Spinner::with_output(output.clone())
///     .title("fetching")
///     .interval(Duration::from_millis(50))
///     .run(|| async { "done" })
///     .await;
///
/// assert_eq!(value, "done");
/// assert!(output.contents().starts_with("  ⠋ fetching\r"));
/// # });
/// ```
#[derive(Debug)]
pub struct Spinner<W = Stderr> {
    title: String,
    interval: Duration,
    output: W,
}

impl Spinner<Stderr> {
    /// A spinner with an empty title that draws on stderr.
    pub fn new() -> Self {
        Self::with_output(io::stderr())
    }
}

impl Default for Spinner<Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Spinner<W> {
    /// A spinner with an empty title that draws on `output`.
    pub fn with_output(output: W) -> Self {
        Self {
            title: String::new(),
            interval: DEFAULT_INTERVAL,
            output,
        }
    }

    /// Text shown after the glyph.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Time between frames. Values below one millisecond are rounded up.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run `callback` with the animation going, returning its output.
    ///
    /// Nothing is drawn when the ambient `quiet` setting is on.
    pub async fn run<F, Fut>(self, callback: F) -> Fut::Output
    where
        F: FnOnce() -> Fut,
        Fut: Future,
    {
        let Spinner {
            title,
            interval,
            mut output,
        } = self;

        context::within(async move {
            context::update(|s| s.verbose = false);

            if context::current().quiet {
                return callback().await;
            }

            let mut ticker = FrameTicker::start(title, interval);
            draw(&mut ticker, &mut output);

            let action = callback();
            tokio::pin!(action);

            let result = loop {
                tokio::select! {
                    biased;
                    _ = ticker.tick() => draw(&mut ticker, &mut output),
                    result = &mut action => break result,
                }
            };

            ticker.stop();
            result
        })
        .await
    }
}

fn draw<W: Write>(ticker: &mut FrameTicker, output: &mut W) {
    if let Err(_err) = ticker.render(output) {
        #[cfg(feature = "tracing")]
        tracing::debug!(error = %_err, "failed to write spinner frame");
    }
}

/// Run `callback` under a spinner with no title, drawing on stderr.
pub async fn spinner<F, Fut>(callback: F) -> Fut::Output
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    Spinner::new().run(callback).await
}

/// Run `callback` under a spinner showing `title`, drawing on stderr.
pub async fn spinner_with_title<F, Fut>(title: impl Into<String>, callback: F) -> Fut::Output
where
    F: FnOnce() -> Fut,
    Fut: Future,
{
    Spinner::new().title(title).run(callback).await
}

#[cfg(test)]
mod tests;
