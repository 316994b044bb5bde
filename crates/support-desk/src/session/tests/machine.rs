//! Pure state machine tests for Session.

use crate::session::{Session, MAX_HISTORY};
use crate::CallStatus;

fn connected_session() -> Session {
    let mut session = Session::new();
    assert!(session.start());
    assert!(session.connect());
    session
}

#[test]
fn test_session_new_is_idle_with_defaults() {
    let session = Session::new();
    assert_eq!(session.status, CallStatus::Idle);
    assert_eq!(session.elapsed_seconds, 0);
    assert!(!session.muted);
    assert!(session.video_enabled);
    assert!(session.history.is_empty());
}

#[test]
fn test_full_cycle_records_history() {
    let mut session = Session::new();
    assert!(session.start());
    assert!(session.connect());
    assert!(session.tick());
    assert!(session.end());
    assert!(session.reset());

    let steps: Vec<(CallStatus, CallStatus)> =
        session.history.iter().map(|t| (t.from, t.to)).collect();
    assert_eq!(
        steps,
        vec![
            (CallStatus::Idle, CallStatus::Ringing),
            (CallStatus::Ringing, CallStatus::Connected),
            (CallStatus::Connected, CallStatus::Ended),
            (CallStatus::Ended, CallStatus::Idle),
        ]
    );
}

#[test]
fn test_end_while_ringing_skips_connected() {
    let mut session = Session::new();
    session.start();
    assert!(session.end());
    assert_eq!(session.status, CallStatus::Ended);
    assert_eq!(session.elapsed_seconds, 0);
    assert!(!session.connect(), "pickup after hangup must not connect");
}

#[test]
fn test_end_keeps_elapsed() {
    let mut session = connected_session();
    for _ in 0..5 {
        session.tick();
    }
    session.end();
    assert_eq!(session.elapsed_seconds, 5);
    assert!(!session.tick());
    assert_eq!(session.elapsed_seconds, 5);
}

#[test]
fn test_reset_restores_defaults() {
    let mut session = connected_session();
    session.tick();
    session.toggle_mute();
    session.toggle_video();
    session.end();
    assert!(session.reset());

    assert_eq!(session.snapshot(), crate::SessionSnapshot::default());
}

#[test]
fn test_toggles_only_while_connected() {
    let mut session = Session::new();
    assert!(!session.toggle_mute());
    assert!(!session.toggle_video());

    session.start();
    assert!(!session.toggle_mute());
    assert!(!session.toggle_video());

    session.connect();
    assert!(session.toggle_mute());
    assert!(session.muted);
    assert!(session.toggle_video());
    assert!(!session.video_enabled);

    session.end();
    assert!(!session.toggle_mute());
    assert!(session.muted, "flags freeze once the call has ended");
}

#[test]
fn test_toggle_twice_restores_flag() {
    let mut session = connected_session();
    session.toggle_mute();
    session.toggle_mute();
    assert!(!session.muted);
}

#[test]
fn test_start_is_only_valid_from_idle() {
    let mut session = Session::new();
    session.start();
    assert!(!session.start());
    session.connect();
    assert!(!session.start());
    session.end();
    assert!(!session.start());
    assert_eq!(session.history.len(), 3);
}

#[test]
fn test_end_from_idle_or_ended_is_noop() {
    let mut session = Session::new();
    assert!(!session.end());
    assert!(session.history.is_empty());

    session.start();
    session.end();
    assert!(!session.end());
    assert_eq!(session.history.len(), 2);
}

#[test]
fn test_tick_only_while_connected() {
    let mut session = Session::new();
    assert!(!session.tick());
    session.start();
    assert!(!session.tick());
    assert_eq!(session.elapsed_seconds, 0);
}

#[test]
fn test_tick_saturates() {
    let mut session = connected_session();
    session.elapsed_seconds = u64::MAX;
    assert!(session.tick());
    assert_eq!(session.elapsed_seconds, u64::MAX);
}

#[test]
fn test_history_keeps_only_recent_transitions() {
    let mut session = Session::new();
    for _ in 0..MAX_HISTORY {
        assert!(session.start());
        assert!(session.end());
        assert!(session.reset());
    }

    assert_eq!(session.history.len(), MAX_HISTORY);
    let last = session.history.last().expect("history");
    assert_eq!((last.from, last.to), (CallStatus::Ended, CallStatus::Idle));
    // 192 transitions recorded; the window starts at the 129th, a reset.
    let first = &session.history[0];
    assert_eq!((first.from, first.to), (CallStatus::Ended, CallStatus::Idle));
}
