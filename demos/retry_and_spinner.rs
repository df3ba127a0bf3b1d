//! Retry and Spinner Example
//!
//! Demonstrates the two primitives on a simulated flaky download:
//! - Plain retry with no delay
//! - Retry with a fixed delay and the default log sink
//! - Retry with a delay given as a duration string
//! - A spinner wrapping a retried action
//! - Quiet mode, where the spinner draws nothing
//!
//! Run with `cargo run --example retry_and_spinner`.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tideline::context;
use tideline::prelude::*;

/// Fails until the `succeed_on`-th call.
async fn flaky_fetch(calls: &AtomicU32, succeed_on: u32) -> Result<String, String> {
    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
    tokio::time::sleep(Duration::from_millis(150)).await;
    if n >= succeed_on {
        Ok(format!("payload after {} calls", n))
    } else {
        Err(format!("connection reset on call {}", n))
    }
}

// ==================== Retry ====================

/// Example 1: Retry without a delay
async fn example_basic_retry() {
    println!("\n=== Example 1: Basic Retry ===");

    let calls = AtomicU32::new(0);
    let attempts = NonZeroU32::new(3).unwrap();
    let result = retry(attempts, || flaky_fetch(&calls, 2)).await;

    println!("Result: {:?}", result);
    println!("Calls made: {}", calls.load(Ordering::SeqCst));
}

/// Example 2: Retry with a fixed delay that runs out of attempts
async fn example_exhausted_retry() {
    println!("\n=== Example 2: Exhausted Retry ===");

    let calls = AtomicU32::new(0);
    let attempts = NonZeroU32::new(3).unwrap();
    let result = retry_with_delay(attempts, Duration::from_millis(200), || {
        flaky_fetch(&calls, 10)
    })
    .await;

    match result {
        Ok(body) => println!("Unexpected success: {}", body),
        Err(err) => println!("Gave up with last error: {}", err),
    }
}

/// Example 3: Policy built from a duration string
async fn example_policy_from_string() {
    println!("\n=== Example 3: Delay From a String ===");

    let policy = match RetryPolicy::new(4).and_then(|p| p.with_delay_spec("250ms")) {
        Ok(policy) => policy,
        Err(err) => {
            println!("Bad policy: {}", err);
            return;
        }
    };
    println!(
        "Policy: {} attempts, delay {:?}",
        policy.max_attempts(),
        policy.delay()
    );

    let calls = AtomicU32::new(0);
    let result = Retry::new(policy).run(|| flaky_fetch(&calls, 3)).await;
    println!("Result: {:?}", result);

    match RetryPolicy::new(0) {
        Ok(_) => println!("Zero attempts accepted?"),
        Err(err) => println!("Rejected zero attempts: {}", err),
    }
}

// ==================== Spinner ====================

/// Example 4: Spinner around a retried action
///
/// Retry log lines are silenced while the spinner is drawing.
async fn example_spinner_with_retry() {
    println!("\n=== Example 4: Spinner Around Retry ===");

    let calls = AtomicU32::new(0);
    let attempts = NonZeroU32::new(5).unwrap();
    let result = spinner_with_title("downloading", || {
        retry_with_delay(attempts, Duration::from_millis(300), || {
            flaky_fetch(&calls, 3)
        })
    })
    .await;

    println!("\nResult: {:?}", result);
}

/// Example 5: Quiet mode
async fn example_quiet_spinner() {
    println!("\n=== Example 5: Quiet Spinner ===");

    let value = within(async {
        context::update(|s| s.quiet = true);
        spinner_with_title("hidden", || async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            42
        })
        .await
    })
    .await;

    println!("Value: {} (no frames drawn)", value);
}

#[tokio::main]
async fn main() {
    println!("Tideline Retry and Spinner Examples");
    println!("===================================");

    example_basic_retry().await;
    example_exhausted_retry().await;
    example_policy_from_string().await;
    example_spinner_with_retry().await;
    example_quiet_spinner().await;

    println!("\n=== All examples completed ===");
}
