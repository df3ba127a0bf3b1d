//! Tests for the spinner runner. Most timers run on paused tokio time.

use super::*;
use crate::testing::SharedBuffer;
use tokio::time::sleep;

fn frames(output: &SharedBuffer) -> Vec<String> {
    output
        .contents()
        .split_terminator('\r')
        .map(str::to_string)
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_returns_value_after_one_frame() {
    let output = SharedBuffer::new();

    let value = Spinner::with_output(output.clone())
        .title("loading")
        .run(|| async { 42 })
        .await;

    assert_eq!(value, 42);
    assert_eq!(output.contents(), "  ⠋ loading\r");
}

#[tokio::test(start_paused = true)]
async fn test_frames_cycle_and_wrap() {
    let output = SharedBuffer::new();

    Spinner::with_output(output.clone())
        .title("t")
        .run(|| sleep(Duration::from_millis(1050)))
        .await;

    let frames = frames(&output);
    assert!(frames.len() >= 11, "frames: {:?}", frames);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(*frame, format!("  {} t", FRAMES[i % FRAMES.len()]));
    }
    assert!(!output.contents().contains('\n'));
}

#[tokio::test(start_paused = true)]
async fn test_no_frames_after_success() {
    let output = SharedBuffer::new();

    let value = Spinner::with_output(output.clone())
        .run(|| async {
            sleep(Duration::from_millis(250)).await;
            "ok"
        })
        .await;
    assert_eq!(value, "ok");

    let settled = output.contents();
    assert!(!settled.is_empty());
    sleep(Duration::from_secs(1)).await;
    assert_eq!(output.contents(), settled);
}

#[tokio::test(start_paused = true)]
async fn test_no_frames_after_failure() {
    let output = SharedBuffer::new();

    let result = Spinner::with_output(output.clone())
        .title("failing")
        .run(|| async {
            sleep(Duration::from_millis(150)).await;
            Err::<(), _>("boom")
        })
        .await;
    assert_eq!(result, Err("boom"));

    let settled = output.contents();
    assert!(settled.starts_with("  ⠋ failing\r"));
    sleep(Duration::from_secs(1)).await;
    assert_eq!(output.contents(), settled);
}

#[tokio::test(start_paused = true)]
async fn test_no_frames_after_cancellation() {
    let output = SharedBuffer::new();

    context::within(async {
        context::update(|s| s.verbose = true);

        let run = Spinner::with_output(output.clone())
            .run(|| std::future::pending::<()>());
        let timed_out = tokio::time::timeout(Duration::from_millis(220), run).await;
        assert!(timed_out.is_err());
        assert!(context::current().verbose);
    })
    .await;

    let settled = output.contents();
    assert!(!settled.is_empty());
    sleep(Duration::from_secs(1)).await;
    assert_eq!(output.contents(), settled);
}

#[tokio::test]
async fn test_verbosity_suppressed_then_restored() {
    context::within(async {
        context::update(|s| s.verbose = true);

        let seen = Spinner::with_output(SharedBuffer::new())
            .run(|| async { context::current().verbose })
            .await;

        assert!(!seen);
        assert!(context::current().verbose);
    })
    .await;
}

#[tokio::test]
async fn test_verbosity_restored_after_failure() {
    context::within(async {
        context::update(|s| s.verbose = true);

        let result = Spinner::with_output(SharedBuffer::new())
            .run(|| async {
                assert!(!context::current().verbose);
                Err::<(), _>("nope")
            })
            .await;

        assert_eq!(result, Err("nope"));
        assert!(context::current().verbose);
    })
    .await;
}

#[tokio::test]
async fn test_restores_callers_verbose_off() {
    context::within(async {
        context::update(|s| s.verbose = false);

        Spinner::with_output(SharedBuffer::new())
            .run(|| async {})
            .await;

        // Restores the caller's value, not the default.
        assert!(!context::current().verbose);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_quiet_draws_nothing() {
    let output = SharedBuffer::new();

    let value = context::within(async {
        context::update(|s| s.quiet = true);
        Spinner::with_output(output.clone())
            .title("hidden")
            .run(|| async {
                sleep(Duration::from_millis(500)).await;
                7
            })
            .await
    })
    .await;

    assert_eq!(value, 7);
    assert_eq!(output.contents(), "");
}

#[tokio::test(start_paused = true)]
async fn test_write_errors_do_not_fail_the_action() {
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let value = Spinner::with_output(Broken)
        .run(|| async {
            sleep(Duration::from_millis(300)).await;
            "finished"
        })
        .await;

    assert_eq!(value, "finished");
}

#[tokio::test(start_paused = true)]
async fn test_custom_interval() {
    let output = SharedBuffer::new();

    Spinner::with_output(output.clone())
        .interval(Duration::from_millis(500))
        .run(|| sleep(Duration::from_millis(1200)))
        .await;

    // Ticks at 0ms, 500ms and 1000ms.
    assert_eq!(frames(&output).len(), 3);
}

#[tokio::test]
async fn test_free_functions_return_callback_output() {
    assert_eq!(spinner(|| async { 1 }).await, 1);
    assert_eq!(spinner_with_title("two", || async { 2 }).await, 2);
}

#[tokio::test]
async fn test_ready_callback_draws_a_frame_in_real_time() {
    for _ in 0..20 {
        let output = SharedBuffer::new();

        let value = Spinner::with_output(output.clone())
            .title("loading")
            .run(|| async { 42 })
            .await;

        assert_eq!(value, 42);
        assert_eq!(output.contents(), "  ⠋ loading\r");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_real_time_frames_stop_at_settlement() {
    let output = SharedBuffer::new();

    let result = Spinner::with_output(output.clone())
        .interval(Duration::from_millis(10))
        .run(|| async {
            sleep(Duration::from_millis(60)).await;
            Err::<(), _>("late failure")
        })
        .await;
    assert_eq!(result, Err("late failure"));

    let settled = output.contents();
    assert!(settled.starts_with("  ⠋ \r"));
    sleep(Duration::from_millis(100)).await;
    assert_eq!(output.contents(), settled);
}
