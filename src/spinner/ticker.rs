//! The animation timer owned by a running spinner.

use std::io::{self, Write};
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Glyphs cycled through by the spinner, one per tick.
pub const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Shortest allowed tick period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Per-invocation spinner state: the title, the next frame, and the timer.
///
/// The ticker only fires while it is being polled, so once the owner stops
/// polling (or drops it) no further frames can be produced.
#[derive(Debug)]
pub(crate) struct FrameTicker {
    title: String,
    frame_index: usize,
    interval: Interval,
}

impl FrameTicker {
    /// Start the timer. The first tick completes one period from now; the
    /// caller draws the opening frame itself.
    pub(crate) fn start(title: String, period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            title,
            frame_index: 0,
            interval,
        }
    }

    /// Wait for the next tick.
    pub(crate) async fn tick(&mut self) {
        self.interval.tick().await;
    }

    /// Write the current frame as `"  <glyph> <title>\r"` and advance.
    pub(crate) fn render<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        let glyph = FRAMES[self.frame_index % FRAMES.len()];
        self.frame_index = self.frame_index.wrapping_add(1);
        write!(out, "  {} {}\r", glyph, self.title)?;
        out.flush()
    }

    /// Stop the timer, returning how many frames were rendered.
    pub(crate) fn stop(self) -> usize {
        #[cfg(feature = "tracing")]
        tracing::debug!(frames = self.frame_index, title = %self.title, "spinner stopped");
        self.frame_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_render_cycles_through_frames() {
        let mut ticker = FrameTicker::start("work".to_string(), Duration::from_millis(100));
        let mut out = Vec::new();

        for _ in 0..FRAMES.len() + 2 {
            ticker.render(&mut out).unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        let frames: Vec<&str> = text.split_terminator('\r').collect();
        assert_eq!(frames.len(), 12);
        assert_eq!(frames[0], "  ⠋ work");
        assert_eq!(frames[9], "  ⠏ work");
        assert_eq!(frames[10], frames[0]);
        assert_eq!(frames[11], "  ⠙ work");
        assert_eq!(ticker.stop(), 12);
    }

    #[tokio::test]
    async fn test_render_never_emits_newline() {
        let mut ticker = FrameTicker::start(String::new(), Duration::from_millis(100));
        let mut out = Vec::new();
        ticker.render(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  ⠋ \r");
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let start = Instant::now();
        let mut ticker = FrameTicker::start(String::new(), Duration::from_millis(100));
        ticker.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_clamped() {
        let mut ticker = FrameTicker::start(String::new(), Duration::ZERO);
        ticker.tick().await;
        ticker.tick().await;
    }
}
