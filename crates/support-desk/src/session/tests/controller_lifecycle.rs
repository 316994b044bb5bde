//! Timer-driven lifecycle tests for SessionController.
//!
//! All tests run with paused time; sleeping advances the clock instantly once
//! every other task is idle.

use super::{advance_ms, default_controller};
use crate::session::SessionController;
use crate::{CallStatus, SessionSnapshot, SessionTimings};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_new_controller_is_idle() {
    let controller = default_controller();
    assert_eq!(controller.snapshot().await, SessionSnapshot::default());
    assert!(controller.history().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_start_rings_then_connects_after_three_seconds() {
    let controller = default_controller();
    assert!(controller.start_session().await);

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.status, CallStatus::Ringing);
    assert_eq!(snapshot.elapsed_seconds, 0);

    advance_ms(2_900).await;
    assert_eq!(controller.snapshot().await.status, CallStatus::Ringing);

    advance_ms(200).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.status, CallStatus::Connected);
    assert_eq!(snapshot.elapsed_seconds, 0);
}

#[tokio::test(start_paused = true)]
async fn test_elapsed_counts_once_per_second_while_connected() {
    let controller = default_controller();
    controller.start_session().await;

    // Connected at 3 s; ticks at 4, 5, 6, 7, 8.
    advance_ms(8_500).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.status, CallStatus::Connected);
    assert_eq!(snapshot.elapsed_seconds, 5);
}

#[tokio::test(start_paused = true)]
async fn test_end_freezes_elapsed_then_returns_to_idle() {
    let controller = default_controller();
    controller.start_session().await;
    advance_ms(8_500).await;

    assert!(controller.end_session().await);
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.status, CallStatus::Ended);
    assert_eq!(snapshot.elapsed_seconds, 5);

    advance_ms(2_000).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.status, CallStatus::Ended);
    assert_eq!(snapshot.elapsed_seconds, 5, "no ticks after hangup");

    advance_ms(1_100).await;
    assert_eq!(controller.snapshot().await, SessionSnapshot::default());
}

#[tokio::test(start_paused = true)]
async fn test_end_while_ringing_never_connects() {
    let controller = default_controller();
    controller.start_session().await;
    advance_ms(1_000).await;

    assert!(controller.end_session().await);
    assert_eq!(controller.snapshot().await.status, CallStatus::Ended);

    // Past the original pickup time.
    advance_ms(2_500).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.status, CallStatus::Ended);
    assert_eq!(snapshot.elapsed_seconds, 0);

    advance_ms(1_000).await;
    assert_eq!(controller.snapshot().await.status, CallStatus::Idle);

    let statuses: Vec<CallStatus> = controller.history().await.iter().map(|t| t.to).collect();
    assert_eq!(
        statuses,
        vec![CallStatus::Ringing, CallStatus::Ended, CallStatus::Idle]
    );
}

#[tokio::test(start_paused = true)]
async fn test_reset_restores_media_defaults() {
    let controller = default_controller();
    controller.start_session().await;
    advance_ms(3_100).await;

    assert!(controller.toggle_mute().await);
    assert!(controller.toggle_video().await);
    controller.end_session().await;

    let snapshot = controller.snapshot().await;
    assert!(snapshot.muted);
    assert!(!snapshot.video_enabled);

    advance_ms(3_100).await;
    let snapshot = controller.snapshot().await;
    assert!(!snapshot.muted);
    assert!(snapshot.video_enabled);
}

#[tokio::test(start_paused = true)]
async fn test_second_call_starts_from_zero() {
    let controller = default_controller();
    controller.start_session().await;
    advance_ms(6_500).await;
    controller.end_session().await;
    advance_ms(3_100).await;

    assert!(controller.start_session().await);
    advance_ms(4_500).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.status, CallStatus::Connected);
    assert_eq!(snapshot.elapsed_seconds, 1);
}

#[tokio::test(start_paused = true)]
async fn test_custom_timings_are_honoured() {
    let controller = SessionController::new(SessionTimings {
        ring_delay: Duration::from_millis(500),
        end_delay: Duration::from_millis(250),
        tick_interval: Duration::from_millis(100),
    });
    controller.start_session().await;

    advance_ms(550).await;
    assert_eq!(controller.snapshot().await.status, CallStatus::Connected);

    advance_ms(1_000).await;
    assert_eq!(controller.snapshot().await.elapsed_seconds, 10);

    controller.end_session().await;
    advance_ms(300).await;
    assert_eq!(controller.snapshot().await.status, CallStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_zero_tick_interval_does_not_panic() {
    let controller = SessionController::new(SessionTimings {
        tick_interval: Duration::ZERO,
        ..SessionTimings::default()
    });
    controller.start_session().await;
    advance_ms(3_010).await;
    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.status, CallStatus::Connected);
    assert!(snapshot.elapsed_seconds > 0);
}
