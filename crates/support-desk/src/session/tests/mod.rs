//! Tests for the session module.
//!
//! Tests are organized into categories:
//! - `machine`: Pure `Session` transitions and no-op rules
//! - `properties`: Exhaustive operation sequences against the invariants
//! - `controller_lifecycle`: Timer-driven transitions under paused time
//! - `controller_intents`: Intents in every status, stale timers
//! - `subscriber`: Broadcast channel and notifications

mod controller_lifecycle;
mod machine;
mod subscriber;

use super::SessionController;
use crate::SessionTimings;
use std::time::Duration;

/// Controller with the default 3 s / 3 s / 1 s timings.
pub(super) fn default_controller() -> SessionController {
    SessionController::new(SessionTimings::default())
}

/// Advance paused time by `millis` and let woken tasks run.
pub(super) async fn advance_ms(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}
