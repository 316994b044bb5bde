//! Broadcast channel tests for SessionController.

use super::{advance_ms, default_controller};
use crate::{CallStatus, UpdateKind};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

#[tokio::test(start_paused = true)]
async fn test_subscriber_count_tracks_receivers() {
    let controller = default_controller();
    assert_eq!(controller.subscriber_count(), 0);

    let rx1 = controller.subscribe();
    let _rx2 = controller.subscribe();
    assert_eq!(controller.subscriber_count(), 2);

    drop(rx1);
    assert_eq!(controller.subscriber_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_updates_follow_the_call() {
    let controller = default_controller();
    let mut rx = controller.subscribe();
    controller.start_session().await;

    let update = rx.recv().await.expect("ringing");
    assert_eq!(
        update.kind,
        UpdateKind::Transition {
            from: CallStatus::Idle,
            to: CallStatus::Ringing
        }
    );

    let update = rx.recv().await.expect("connected");
    assert_eq!(
        update.kind,
        UpdateKind::Transition {
            from: CallStatus::Ringing,
            to: CallStatus::Connected
        }
    );

    let update = rx.recv().await.expect("tick");
    assert_eq!(update.kind, UpdateKind::Tick);
    assert_eq!(update.snapshot.elapsed_seconds, 1);

    let update = rx.recv().await.expect("tick");
    assert_eq!(update.snapshot.elapsed_seconds, 2);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_updates_carry_new_flags() {
    let controller = default_controller();
    controller.start_session().await;
    advance_ms(3_100).await;

    let mut rx = controller.subscribe();
    controller.toggle_mute().await;
    controller.toggle_video().await;

    let update = rx.recv().await.expect("mute");
    assert_eq!(update.kind, UpdateKind::Mute);
    assert!(update.snapshot.muted);

    let update = rx.recv().await.expect("video");
    assert_eq!(update.kind, UpdateKind::Video);
    assert!(!update.snapshot.video_enabled);
}

#[tokio::test(start_paused = true)]
async fn test_ignored_intents_broadcast_nothing() {
    let controller = default_controller();
    let mut rx = controller.subscribe();

    controller.end_session().await;
    controller.toggle_mute().await;
    controller.toggle_video().await;

    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_controller_closes_channel() {
    let controller = default_controller();
    let mut rx = controller.subscribe();
    controller.start_session().await;
    drop(controller);

    let update = rx.recv().await.expect("buffered ringing update");
    assert_eq!(update.snapshot.status, CallStatus::Ringing);
    assert_eq!(rx.recv().await, Err(RecvError::Closed));
}
