//! Async owner of a call session and its timers.
//!
//! The controller keeps the [`Session`] behind a mutex together with the one
//! timer task that may be pending for the current status:
//!
//! - Ringing: a one-shot that connects the call after the ring delay
//! - Connected: the elapsed-time ticker
//! - Ended: a one-shot that resets to Idle after the end delay
//! - Idle: nothing
//!
//! Every status change aborts the previous timer and bumps a generation
//! counter before arming the next one. A timer that wakes up under a newer
//! generation returns without touching the session, so a stale pickup or
//! reset can never land on a later call.

use super::Session;
use crate::{CallStatus, SessionSnapshot, SessionTimings, SessionUpdate, StateTransition, UpdateKind};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

/// Capacity of the update channel. One update per second while Connected,
/// so slow subscribers have minutes of slack before they lag.
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Floor for the tick period; `tokio::time::interval` rejects zero.
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Cloneable handle to one simulated call session.
///
/// All clones drive the same session. Dropping the last clone aborts any
/// pending timer.
///
/// # Example
///
/// ```
/// use support_desk::session::SessionController;
/// use support_desk::{CallStatus, SessionTimings};
///
/// #[tokio::main]
/// async fn main() {
///     let controller = SessionController::new(SessionTimings::default());
///     assert!(controller.start_session().await);
///     assert_eq!(controller.snapshot().await.status, CallStatus::Ringing);
///
///     assert!(controller.end_session().await);
///     assert_eq!(controller.snapshot().await.status, CallStatus::Ended);
/// }
/// ```
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<State>,
    update_tx: broadcast::Sender<SessionUpdate>,
    timings: SessionTimings,
}

struct State {
    session: Session,
    /// Pending timer for the current status, if any.
    timer: Option<JoinHandle<()>>,
    /// Bumped on every status change; timers compare against it.
    generation: u64,
}

impl Drop for State {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// One-shot timers and the transition each applies when it fires.
#[derive(Debug, Clone, Copy)]
enum Delayed {
    Connect,
    Reset,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("timings", &self.shared.timings)
            .field("subscriber_count", &self.shared.update_tx.receiver_count())
            .finish()
    }
}

impl SessionController {
    /// Creates a controller for a new Idle session.
    pub fn new(timings: SessionTimings) -> Self {
        let (update_tx, _rx) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    session: Session::new(),
                    timer: None,
                    generation: 0,
                }),
                update_tx,
                timings,
            }),
        }
    }

    /// Delays this controller was created with.
    pub fn timings(&self) -> SessionTimings {
        self.shared.timings
    }

    /// Current observable session state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.shared.state.lock().await.session.snapshot()
    }

    /// Status transitions recorded so far, oldest first.
    pub async fn history(&self) -> Vec<StateTransition> {
        self.shared.state.lock().await.session.history.clone()
    }

    /// Subscribes to session updates.
    ///
    /// The receiver sees every change made after this call, including
    /// ticks and timer-driven transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.shared.update_tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.shared.update_tx.receiver_count()
    }

    /// Places a call: Idle → Ringing, then Connected after the ring delay.
    ///
    /// Returns `false` and changes nothing unless the session is Idle.
    pub async fn start_session(&self) -> bool {
        self.transition("start", Session::start).await
    }

    /// Hangs up: Ringing/Connected → Ended, then Idle after the end delay.
    ///
    /// Returns `false` and changes nothing from Idle or Ended.
    pub async fn end_session(&self) -> bool {
        self.transition("end", Session::end).await
    }

    /// Flips the mic mute flag. No-op unless Connected.
    pub async fn toggle_mute(&self) -> bool {
        self.toggle("mute", Session::toggle_mute, UpdateKind::Mute).await
    }

    /// Flips the camera flag. No-op unless Connected.
    pub async fn toggle_video(&self) -> bool {
        self.toggle("video", Session::toggle_video, UpdateKind::Video).await
    }

    async fn transition(&self, intent: &str, op: fn(&mut Session) -> bool) -> bool {
        let mut state = self.shared.state.lock().await;
        let from = state.session.status;
        if !op(&mut state.session) {
            tracing::trace!(intent, status = %from, "intent ignored");
            return false;
        }
        self.shared.rearm(&mut state, from);
        true
    }

    async fn toggle(&self, intent: &str, op: fn(&mut Session) -> bool, kind: UpdateKind) -> bool {
        let mut state = self.shared.state.lock().await;
        if !op(&mut state.session) {
            tracing::trace!(intent, status = %state.session.status, "intent ignored");
            return false;
        }
        tracing::debug!(intent, "session toggled");
        self.shared.broadcast(kind, state.session.snapshot());
        true
    }
}

impl Shared {
    /// Cancels the pending timer, arms the one for the new status and
    /// announces the transition.
    fn rearm(self: &Arc<Self>, state: &mut State, from: CallStatus) {
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        state.generation = state.generation.wrapping_add(1);

        let to = state.session.status;
        tracing::debug!(%from, %to, generation = state.generation, "session transition");

        state.timer = match to {
            CallStatus::Ringing => Some(self.spawn_delayed(
                state.generation,
                self.timings.ring_delay,
                Delayed::Connect,
            )),
            CallStatus::Connected => Some(self.spawn_ticker(state.generation)),
            CallStatus::Ended => Some(self.spawn_delayed(
                state.generation,
                self.timings.end_delay,
                Delayed::Reset,
            )),
            CallStatus::Idle => None,
        };

        self.broadcast(UpdateKind::Transition { from, to }, state.session.snapshot());
    }

    fn spawn_delayed(self: &Arc<Self>, generation: u64, delay: Duration, step: Delayed) -> JoinHandle<()> {
        let weak: Weak<Shared> = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let mut state = shared.state.lock().await;
            if state.generation != generation {
                tracing::trace!(?step, "stale timer dropped");
                return;
            }
            // This task is the pending timer; release it rather than abort it.
            state.timer = None;

            let from = state.session.status;
            let applied = match step {
                Delayed::Connect => state.session.connect(),
                Delayed::Reset => state.session.reset(),
            };
            if applied {
                shared.rearm(&mut state, from);
            }
        })
    }

    fn spawn_ticker(self: &Arc<Self>, generation: u64) -> JoinHandle<()> {
        let weak: Weak<Shared> = Arc::downgrade(self);
        let period = self.timings.tick_interval.max(MIN_TICK_INTERVAL);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                interval.tick().await;
                let Some(shared) = weak.upgrade() else {
                    break;
                };
                let mut state = shared.state.lock().await;
                if state.generation != generation || !state.session.tick() {
                    break;
                }
                shared.broadcast(UpdateKind::Tick, state.session.snapshot());
            }
        })
    }

    fn broadcast(&self, kind: UpdateKind, snapshot: SessionSnapshot) {
        match self.update_tx.send(SessionUpdate { kind, snapshot }) {
            Ok(count) => {
                tracing::trace!("Broadcast update sent to {} subscribers", count);
            }
            Err(_) => {
                tracing::trace!("No subscribers for session update broadcast");
            }
        }
    }
}
