//! Async owner of a chat transcript and the bot's pending replies.
//!
//! Each accepted message spawns one reply task. The task sleeps through the
//! think delay, raises the typing indicator, sleeps through a random typing
//! phase and appends the bot's answer. Clearing the chat aborts every
//! pending task and bumps a generation counter, so a reply that was already
//! waking up cannot land in the emptied transcript.

use super::{reply_for, timestamp_now, welcome_messages, ChatMessage, ChatTimings, ChatUpdate, Sender};
use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Cloneable handle to one support chat.
///
/// All clones share the transcript. Dropping the last clone aborts any
/// pending reply.
#[derive(Clone)]
pub struct ChatResponder {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<State>,
    update_tx: broadcast::Sender<ChatUpdate>,
    timings: ChatTimings,
}

struct State {
    messages: Vec<ChatMessage>,
    next_id: u64,
    /// Replies scheduled but not yet posted.
    pending: usize,
    /// Replies currently in their typing phase.
    typing: usize,
    tasks: Vec<JoinHandle<()>>,
    /// Bumped by `clear`; reply tasks compare against it.
    generation: u64,
}

impl State {
    fn push(&mut self, sender: Sender, text: String) -> ChatMessage {
        let message = ChatMessage {
            id: self.next_id,
            text,
            sender,
            timestamp: timestamp_now(),
        };
        self.next_id += 1;
        self.messages.push(message.clone());
        message
    }
}

impl Drop for State {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl std::fmt::Debug for ChatResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatResponder")
            .field("timings", &self.shared.timings)
            .field("subscriber_count", &self.shared.update_tx.receiver_count())
            .finish()
    }
}

impl ChatResponder {
    /// Creates a chat holding the welcome transcript.
    pub fn new(timings: ChatTimings) -> Self {
        let messages = welcome_messages();
        let next_id = messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let (update_tx, _rx) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    messages,
                    next_id,
                    pending: 0,
                    typing: 0,
                    tasks: Vec::new(),
                    generation: 0,
                }),
                update_tx,
                timings,
            }),
        }
    }

    /// Delays this chat was created with.
    pub fn timings(&self) -> ChatTimings {
        self.shared.timings
    }

    /// Current transcript, oldest first.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.shared.state.lock().await.messages.clone()
    }

    /// Whether the typing indicator is up.
    pub async fn is_typing(&self) -> bool {
        self.shared.state.lock().await.typing > 0
    }

    /// Number of bot replies still to come.
    pub async fn pending_replies(&self) -> usize {
        self.shared.state.lock().await.pending
    }

    /// Subscribes to transcript changes made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatUpdate> {
        self.shared.update_tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.shared.update_tx.receiver_count()
    }

    /// Appends a user message and schedules the bot's reply.
    ///
    /// Blank or whitespace-only text is ignored and returns `None`.
    pub async fn send(&self, text: &str) -> Option<ChatMessage> {
        if text.trim().is_empty() {
            tracing::trace!("blank chat message ignored");
            return None;
        }

        let mut state = self.shared.state.lock().await;
        let message = state.push(Sender::User, text.to_string());
        tracing::debug!(id = message.id, "chat message sent");
        self.shared.broadcast(ChatUpdate::Message(message.clone()));

        state.pending += 1;
        state.tasks.retain(|task| !task.is_finished());
        let reply = self
            .shared
            .spawn_reply(state.generation, reply_for(&message.text));
        state.tasks.push(reply);
        Some(message)
    }

    /// Empties the transcript and cancels pending replies.
    ///
    /// Returns the number of messages removed.
    pub async fn clear(&self) -> usize {
        let mut state = self.shared.state.lock().await;
        for task in state.tasks.drain(..) {
            task.abort();
        }
        state.generation = state.generation.wrapping_add(1);
        state.pending = 0;
        let was_typing = state.typing > 0;
        state.typing = 0;
        let removed = state.messages.len();
        state.messages.clear();

        tracing::debug!(removed, "chat cleared");
        if was_typing {
            self.shared.broadcast(ChatUpdate::Typing(false));
        }
        self.shared.broadcast(ChatUpdate::Cleared);
        removed
    }
}

impl Shared {
    fn spawn_reply(self: &Arc<Self>, generation: u64, reply: &'static str) -> JoinHandle<()> {
        let weak: Weak<Shared> = Arc::downgrade(self);
        let think = self.timings.think_delay;
        let typing = self.timings.typing_delay();
        tokio::spawn(async move {
            tokio::time::sleep(think).await;
            {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let mut state = shared.state.lock().await;
                if state.generation != generation {
                    return;
                }
                state.typing += 1;
                if state.typing == 1 {
                    shared.broadcast(ChatUpdate::Typing(true));
                }
            }

            tokio::time::sleep(typing).await;
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let mut state = shared.state.lock().await;
            if state.generation != generation {
                tracing::trace!("stale chat reply dropped");
                return;
            }
            state.typing = state.typing.saturating_sub(1);
            state.pending = state.pending.saturating_sub(1);
            let message = state.push(Sender::Bot, reply.to_string());
            tracing::debug!(id = message.id, ?typing, "bot replied");
            shared.broadcast(ChatUpdate::Message(message));
            if state.typing == 0 {
                shared.broadcast(ChatUpdate::Typing(false));
            }
        })
    }

    fn broadcast(&self, update: ChatUpdate) {
        if self.update_tx.send(update).is_err() {
            tracing::trace!("No subscribers for chat update broadcast");
        }
    }
}
