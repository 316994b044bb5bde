//! Tests for the chat module.
//!
//! - `replies`: Keyword reply selection and timing bounds
//! - `responder`: Reply scheduling under paused time, blank input, clearing


use super::{ChatResponder, ChatTimings};
use std::time::Duration;

/// Responder with the default 500 ms think delay and 1.5-3.5 s typing.
pub(super) fn default_responder() -> ChatResponder {
    ChatResponder::new(ChatTimings::default())
}

/// Responder whose typing phase always lasts exactly `typing_ms`.
pub(super) fn fixed_responder(typing_ms: u64) -> ChatResponder {
    let typing = Duration::from_millis(typing_ms);
    ChatResponder::new(ChatTimings {
        typing_min: typing,
        typing_max: typing,
        ..ChatTimings::default()
    })
}

/// Advance paused time by `millis` and let woken tasks run.
pub(super) async fn advance_ms(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
