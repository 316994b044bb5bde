//! Call session module.
//!
//! [`Session`] is the pure state machine: it knows which transitions are
//! allowed and what each one resets, but owns no clock. [`SessionController`]
//! wraps a `Session` for async use and drives the delayed transitions and the
//! elapsed-time tick.
//!
//! ```text
//! Idle --start--> Ringing --(ring delay)--> Connected --end--> Ended --(end delay)--> Idle
//! Ringing --end--> Ended
//! ```

use crate::{CallStatus, SessionSnapshot, StateTransition};
use std::time::Instant;

mod controller;

pub use controller::SessionController;

#[cfg(test)]
mod tests;

/// Most recent transitions kept in [`Session::history`]; older ones are
/// dropped first. Sixteen full calls at four transitions each.
pub const MAX_HISTORY: usize = 64;

/// Call session state with history tracking.
///
/// Every operation returns `true` if it changed the session and `false` if
/// it was not valid in the current status (in which case nothing changes).
#[derive(Debug, Clone)]
pub struct Session {
    /// Current status.
    pub status: CallStatus,
    /// Whole seconds spent Connected in the current call.
    pub elapsed_seconds: u64,
    /// Whether the local microphone is muted.
    pub muted: bool,
    /// Whether the local camera is on.
    pub video_enabled: bool,
    /// Timestamp when status last changed.
    pub since: Instant,
    /// Recent status transitions, oldest first, at most [`MAX_HISTORY`].
    pub history: Vec<StateTransition>,
}

impl Session {
    /// Creates an Idle session with default mic and camera settings.
    pub fn new() -> Self {
        let defaults = SessionSnapshot::default();
        Self {
            status: defaults.status,
            elapsed_seconds: defaults.elapsed_seconds,
            muted: defaults.muted,
            video_enabled: defaults.video_enabled,
            since: Instant::now(),
            history: Vec::new(),
        }
    }

    /// Copy of the observable fields.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            elapsed_seconds: self.elapsed_seconds,
            muted: self.muted,
            video_enabled: self.video_enabled,
        }
    }

    /// Idle → Ringing. Resets the elapsed counter.
    ///
    /// ```
    /// use support_desk::session::Session;
    /// use support_desk::CallStatus;
    ///
    /// let mut session = Session::new();
    /// assert!(session.start());
    /// assert_eq!(session.status, CallStatus::Ringing);
    /// assert_eq!(session.elapsed_seconds, 0);
    ///
    /// // Already ringing: no-op
    /// assert!(!session.start());
    /// assert_eq!(session.history.len(), 1);
    /// ```
    pub fn start(&mut self) -> bool {
        if self.status != CallStatus::Idle {
            return false;
        }
        self.set_status(CallStatus::Ringing);
        self.elapsed_seconds = 0;
        true
    }

    /// Ringing → Connected (the simulated pickup).
    pub fn connect(&mut self) -> bool {
        if self.status != CallStatus::Ringing {
            return false;
        }
        self.set_status(CallStatus::Connected);
        true
    }

    /// Ringing or Connected → Ended. The elapsed counter is kept as-is.
    pub fn end(&mut self) -> bool {
        if !self.status.is_live() {
            return false;
        }
        self.set_status(CallStatus::Ended);
        true
    }

    /// Ended → Idle, restoring counter, mic and camera to their defaults.
    pub fn reset(&mut self) -> bool {
        if self.status != CallStatus::Ended {
            return false;
        }
        let defaults = SessionSnapshot::default();
        self.set_status(CallStatus::Idle);
        self.elapsed_seconds = defaults.elapsed_seconds;
        self.muted = defaults.muted;
        self.video_enabled = defaults.video_enabled;
        true
    }

    /// Adds one second to the elapsed counter while Connected.
    pub fn tick(&mut self) -> bool {
        if self.status != CallStatus::Connected {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        true
    }

    /// Flips the mic mute flag while Connected.
    pub fn toggle_mute(&mut self) -> bool {
        if self.status != CallStatus::Connected {
            return false;
        }
        self.muted = !self.muted;
        true
    }

    /// Flips the camera flag while Connected.
    pub fn toggle_video(&mut self) -> bool {
        if self.status != CallStatus::Connected {
            return false;
        }
        self.video_enabled = !self.video_enabled;
        true
    }

    /// Records the transition and moves to `new_status`.
    ///
    /// Callers have already checked the transition is allowed, so `new_status`
    /// always differs from the current status.
    fn set_status(&mut self, new_status: CallStatus) {
        let now = Instant::now();
        self.history.push(StateTransition {
            timestamp: now,
            from: self.status,
            to: new_status,
            duration: now.duration_since(self.since),
        });
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
        self.status = new_status;
        self.since = now;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
