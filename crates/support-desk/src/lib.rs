//! Support Desk library
//!
//! This crate provides the core of the support desk console: the simulated
//! call session and its timers, the support chat bot, configuration loading,
//! logging setup and the line-oriented consoles that run in a terminal.
//!
//! Account storage lives in the `account-store` crate and the remote records
//! client in `records-api`; both are re-exported for the binary's convenience.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Simulated call session state machine and its timer-driving controller.
pub mod session;

/// Line-oriented terminal console for driving a call session.
pub mod console;

/// Support chat transcript and the keyword-driven reply bot.
pub mod chat;

/// Logging initialization.
pub mod logging;

pub use account_store;
pub use records_api;

/// Delay between entering Ringing and the simulated pickup.
pub const DEFAULT_RING_DELAY: Duration = Duration::from_secs(3);

/// Delay between entering Ended and the automatic return to Idle.
pub const DEFAULT_END_DELAY: Duration = Duration::from_secs(3);

/// Period of the elapsed-time tick while Connected.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Call status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// No call; ready to start one
    Idle,
    /// Outgoing call placed, waiting for the simulated pickup
    Ringing,
    /// Call in progress; the elapsed timer is running
    Connected,
    /// Call finished; shown briefly before returning to idle
    Ended,
}

impl CallStatus {
    /// Returns `true` while a call is placed or in progress.
    ///
    /// These are the statuses from which a call can be ended.
    pub fn is_live(self) -> bool {
        matches!(self, CallStatus::Ringing | CallStatus::Connected)
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallStatus::Idle => "idle",
            CallStatus::Ringing => "ringing",
            CallStatus::Connected => "connected",
            CallStatus::Ended => "ended",
        };
        write!(f, "{}", s)
    }
}

/// Error type for parsing CallStatus from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid call status: {}", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for CallStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(CallStatus::Idle),
            "ringing" => Ok(CallStatus::Ringing),
            "connected" => Ok(CallStatus::Connected),
            "ended" => Ok(CallStatus::Ended),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Observable state of a call session at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionSnapshot {
    /// Current status.
    pub status: CallStatus,
    /// Whole seconds spent Connected in the current call.
    pub elapsed_seconds: u64,
    /// Whether the local microphone is muted.
    pub muted: bool,
    /// Whether the local camera is on.
    pub video_enabled: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            status: CallStatus::Idle,
            elapsed_seconds: 0,
            muted: false,
            video_enabled: true,
        }
    }
}

/// Record of a status change for tracking session history.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// When the transition occurred.
    pub timestamp: Instant,
    /// Previous status before the transition.
    pub from: CallStatus,
    /// New status after the transition.
    pub to: CallStatus,
    /// Duration spent in the previous status.
    pub duration: Duration,
}

/// What changed in a [`SessionUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Status changed.
    Transition {
        /// Status before the change.
        from: CallStatus,
        /// Status after the change.
        to: CallStatus,
    },
    /// One more second elapsed while Connected.
    Tick,
    /// Microphone mute flipped.
    Mute,
    /// Camera flipped.
    Video,
}

/// Notification broadcast to subscribers whenever the session changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUpdate {
    /// What changed.
    pub kind: UpdateKind,
    /// Session state right after the change.
    pub snapshot: SessionSnapshot,
}

/// Delays that drive the simulated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimings {
    /// Ringing → Connected delay.
    pub ring_delay: Duration,
    /// Ended → Idle delay.
    pub end_delay: Duration,
    /// Elapsed-time tick period while Connected.
    pub tick_interval: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            ring_delay: DEFAULT_RING_DELAY,
            end_delay: DEFAULT_END_DELAY,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

/// Formats whole seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so long calls read `75:00`.
///
/// ```
/// use support_desk::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "00:00");
/// assert_eq!(format_elapsed(65), "01:05");
/// assert_eq!(format_elapsed(4500), "75:00");
/// ```
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests;
