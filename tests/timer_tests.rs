// Tests for the recording duration ticker
//
// The timer only feeds a channel; the orchestrator owns the elapsed counter.
// Stopping must always cancel pending ticks.

use dictation_core::DurationTimer;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_timer_delivers_ticks() {
    let mut timer = DurationTimer::new();
    let mut ticks = timer.start(Duration::from_millis(10));

    for _ in 0..3 {
        timeout(Duration::from_secs(1), ticks.recv())
            .await
            .expect("tick should arrive well within a second")
            .expect("channel should stay open while running");
    }

    assert!(timer.is_running());
}

#[tokio::test]
async fn test_stop_cancels_pending_ticks() {
    let mut timer = DurationTimer::new();
    let mut ticks = timer.start(Duration::from_millis(10));

    timeout(Duration::from_secs(1), ticks.recv())
        .await
        .expect("first tick should arrive")
        .expect("channel open");

    timer.stop();
    assert!(!timer.is_running());

    // After the ticker is aborted the channel drains to closed
    let closed = timeout(Duration::from_secs(1), async {
        while ticks.recv().await.is_some() {}
    })
    .await;
    assert!(closed.is_ok(), "channel should close after stop");
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    let mut timer = DurationTimer::new();
    let _ticks = timer.start(Duration::from_millis(10));

    timer.stop();
    timer.stop();
    assert!(!timer.is_running());
}

#[tokio::test]
async fn test_restart_replaces_the_previous_ticker() {
    let mut timer = DurationTimer::new();
    let mut first = timer.start(Duration::from_millis(10));
    let mut second = timer.start(Duration::from_millis(10));

    // The first channel closes once its ticker is replaced
    let closed = timeout(Duration::from_secs(1), async {
        while first.recv().await.is_some() {}
    })
    .await;
    assert!(closed.is_ok(), "replaced ticker should close its channel");

    timeout(Duration::from_secs(1), second.recv())
        .await
        .expect("replacement ticker should tick")
        .expect("channel open");
}
