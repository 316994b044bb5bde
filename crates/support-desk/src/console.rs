//! Line-oriented call console.
//!
//! Reads one intent per line (`start`, `end`, `mute`, `video`, `status`,
//! `help`, `quit`) and writes one line for every [`SessionUpdate`] the
//! controller broadcasts. Ticks are rendered like any other update, so the
//! `MM:SS` counter advances once per second while connected.

use crate::session::SessionController;
use crate::{format_elapsed, CallStatus, SessionSnapshot, SessionUpdate, UpdateKind};
use std::fmt;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Help text printed by the `help` intent.
pub const HELP: &str = "commands: start | end | mute | video | status | help | quit";

/// A user intent read from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Place a call.
    Start,
    /// Hang up.
    End,
    /// Flip the microphone.
    Mute,
    /// Flip the camera.
    Video,
    /// Print the current state.
    Status,
    /// Print the command list.
    Help,
    /// Leave the console.
    Quit,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Start => "start",
            Intent::End => "end",
            Intent::Mute => "mute",
            Intent::Video => "video",
            Intent::Status => "status",
            Intent::Help => "help",
            Intent::Quit => "quit",
        };
        write!(f, "{}", s)
    }
}

/// Error type for parsing Intent from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIntentError(pub String);

impl fmt::Display for ParseIntentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {} ({})", self.0, HELP)
    }
}

impl std::error::Error for ParseIntentError {}

impl FromStr for Intent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" | "call" | "s" => Ok(Intent::Start),
            "end" | "hangup" | "e" => Ok(Intent::End),
            "mute" | "m" => Ok(Intent::Mute),
            "video" | "camera" | "v" => Ok(Intent::Video),
            "status" | "?" => Ok(Intent::Status),
            "help" | "h" => Ok(Intent::Help),
            "quit" | "exit" | "q" => Ok(Intent::Quit),
            _ => Err(ParseIntentError(s.trim().to_string())),
        }
    }
}

/// The remote party shown in the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Display name.
    pub name: String,
    /// Short initials shown next to the name.
    pub initials: String,
}

impl Contact {
    /// Contact with initials derived from `name`.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        let initials = account_store::avatar_initials(&name);
        Self { name, initials }
    }
}

/// Renders the one-line view of a session.
///
/// ```
/// use support_desk::console::{render_snapshot, Contact};
/// use support_desk::SessionSnapshot;
///
/// let contact = Contact::named("Sarah Wilson");
/// let line = render_snapshot(&contact, &SessionSnapshot::default());
/// assert_eq!(line, "Sarah Wilson (SW) - Ready to start session");
/// ```
pub fn render_snapshot(contact: &Contact, snapshot: &SessionSnapshot) -> String {
    match snapshot.status {
        CallStatus::Idle => format!(
            "{} ({}) - Ready to start session",
            contact.name, contact.initials
        ),
        CallStatus::Ringing => format!("Calling {}...", contact.name),
        CallStatus::Connected => format!(
            "[{}] {} ({}) | mic {} | camera {}",
            format_elapsed(snapshot.elapsed_seconds),
            contact.name,
            contact.initials,
            if snapshot.muted { "muted" } else { "on" },
            if snapshot.video_enabled { "on" } else { "off" },
        ),
        CallStatus::Ended => format!(
            "Call Ended - Duration: {}",
            format_elapsed(snapshot.elapsed_seconds)
        ),
    }
}

/// Renders one broadcast update.
pub fn render_update(contact: &Contact, update: &SessionUpdate) -> String {
    match update.kind {
        UpdateKind::Mute if update.snapshot.muted => "Microphone muted".to_string(),
        UpdateKind::Mute => "Microphone on".to_string(),
        UpdateKind::Video if update.snapshot.video_enabled => "Camera on".to_string(),
        UpdateKind::Video => "Camera off".to_string(),
        UpdateKind::Transition { .. } | UpdateKind::Tick => {
            render_snapshot(contact, &update.snapshot)
        }
    }
}

/// Drives `controller` from `reader` until `quit` or end of input.
///
/// Every update broadcast while the console runs is written to `writer`.
/// Intents that are not valid in the current status are reported and
/// otherwise ignored.
pub async fn run<R, W>(
    controller: &SessionController,
    contact: &Contact,
    reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut updates = controller.subscribe();
    let mut lines = reader.lines();

    let initial = controller.snapshot().await;
    write_line(&mut writer, &render_snapshot(contact, &initial)).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("console input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let intent = match line.parse::<Intent>() {
                    Ok(intent) => intent,
                    Err(e) => {
                        write_line(&mut writer, &e.to_string()).await?;
                        continue;
                    }
                };
                if intent == Intent::Quit {
                    break;
                }
                if let Some(reply) = dispatch(controller, contact, intent).await {
                    write_line(&mut writer, &reply).await?;
                }
            }
            update = updates.recv() => match update {
                Ok(update) => write_line(&mut writer, &render_update(contact, &update)).await?,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "console fell behind session updates");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    // Updates caused by the last intents may still be queued.
    loop {
        match updates.try_recv() {
            Ok(update) => write_line(&mut writer, &render_update(contact, &update)).await?,
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }

    writer.flush().await
}

/// Applies `intent`; returns a line to print when there is no update to
/// show for it.
async fn dispatch(controller: &SessionController, contact: &Contact, intent: Intent) -> Option<String> {
    let applied = match intent {
        Intent::Start => controller.start_session().await,
        Intent::End => controller.end_session().await,
        Intent::Mute => controller.toggle_mute().await,
        Intent::Video => controller.toggle_video().await,
        Intent::Status => {
            return Some(render_snapshot(contact, &controller.snapshot().await));
        }
        Intent::Help => return Some(HELP.to_string()),
        Intent::Quit => return None,
    };
    if applied {
        None
    } else {
        let status = controller.snapshot().await.status;
        Some(format!("{} ignored while {}", intent, status))
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
