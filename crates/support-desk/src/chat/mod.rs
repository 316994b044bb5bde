//! Support chat module.
//!
//! [`reply_for`] is the canned bot: it picks an answer from keywords in the
//! user's message. [`ChatResponder`] owns the transcript and plays the bot
//! with tokio timers: a short pause, a typing phase of random length, then
//! the reply.
//!
//! ```text
//! send --(think delay)--> typing --(typing_min..=typing_max)--> bot reply
//! ```

use rand::Rng;
use std::fmt;
use std::time::Duration;

pub mod console;
mod responder;

pub use responder::ChatResponder;

#[cfg(test)]
mod tests;

/// Pause between a user message and the typing indicator.
pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(500);

/// Shortest typing phase before a reply.
pub const DEFAULT_TYPING_MIN: Duration = Duration::from_millis(1_500);

/// Longest typing phase before a reply.
pub const DEFAULT_TYPING_MAX: Duration = Duration::from_millis(3_500);

/// Reply for messages greeting the bot.
pub const REPLY_GREETING: &str = "Hello! How can I help you today?";
/// Reply for questions about task status.
pub const REPLY_STATUS: &str =
    "I'm checking the status of your tasks. It seems everything is on schedule.";
/// Reply for pricing questions.
pub const REPLY_PRICING: &str =
    "Our pricing varies by language and complexity. I can have a manager send you a quote!";
/// Reply for everything else.
pub const REPLY_FALLBACK: &str =
    "Thank you for your message. Our team is reviewing your request.";

/// Keyword groups in priority order. Matching is a case-insensitive
/// substring test, so "hi" also matches inside "this".
const KEYWORD_REPLIES: [(&[&str], &str); 3] = [
    (&["hello", "hi"], REPLY_GREETING),
    (&["status", "task"], REPLY_STATUS),
    (&["price", "cost"], REPLY_PRICING),
];

/// Picks the bot's answer to `text`.
///
/// ```
/// use support_desk::chat::{reply_for, REPLY_FALLBACK, REPLY_PRICING};
///
/// assert_eq!(reply_for("How much does it COST?"), REPLY_PRICING);
/// assert_eq!(reply_for("Where is my file?"), REPLY_FALLBACK);
/// ```
pub fn reply_for(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    KEYWORD_REPLIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, reply)| *reply)
        .unwrap_or(REPLY_FALLBACK)
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person at the console.
    User,
    /// The support bot.
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        };
        write!(f, "{}", s)
    }
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    /// Unique within one responder, increasing.
    pub id: u64,
    /// Message body as typed.
    pub text: String,
    /// Author.
    pub sender: Sender,
    /// Wall-clock label such as `10:02 AM`.
    pub timestamp: String,
}

impl ChatMessage {
    fn new(id: u64, sender: Sender, text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender,
            timestamp: timestamp.into(),
        }
    }
}

/// Transcript a fresh chat opens with.
pub fn welcome_messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(1, Sender::Bot, "Welcome to Translation Empire support!", "10:00 AM"),
        ChatMessage::new(
            2,
            Sender::Bot,
            "How can we assist you with your translation projects today?",
            "10:00 AM",
        ),
        ChatMessage::new(
            3,
            Sender::User,
            "I have a question about my recent translation task #4512.",
            "10:02 AM",
        ),
        ChatMessage::new(
            4,
            Sender::Bot,
            "Checking that for you... One moment please.",
            "10:02 AM",
        ),
    ]
}

/// Label for a message sent now, e.g. `03:41 PM`.
pub(crate) fn timestamp_now() -> String {
    chrono::Local::now().format("%I:%M %p").to_string()
}

/// Delays used by [`ChatResponder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatTimings {
    /// Pause before the typing indicator appears.
    pub think_delay: Duration,
    /// Lower bound of the typing phase.
    pub typing_min: Duration,
    /// Upper bound of the typing phase. Values below `typing_min` are
    /// treated as `typing_min`.
    pub typing_max: Duration,
}

impl Default for ChatTimings {
    fn default() -> Self {
        Self {
            think_delay: DEFAULT_THINK_DELAY,
            typing_min: DEFAULT_TYPING_MIN,
            typing_max: DEFAULT_TYPING_MAX,
        }
    }
}

impl ChatTimings {
    /// Draws a typing phase length in `typing_min..=typing_max`.
    pub fn typing_delay(&self) -> Duration {
        let span = self.typing_max.saturating_sub(self.typing_min);
        let span_ms = u64::try_from(span.as_millis()).unwrap_or(u64::MAX);
        if span_ms == 0 {
            return self.typing_min;
        }
        self.typing_min + Duration::from_millis(rand::thread_rng().gen_range(0..=span_ms))
    }
}

/// Change notification broadcast by [`ChatResponder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatUpdate {
    /// A message was appended to the transcript.
    Message(ChatMessage),
    /// The bot started (`true`) or stopped (`false`) typing.
    Typing(bool),
    /// The transcript was emptied.
    Cleared,
}
