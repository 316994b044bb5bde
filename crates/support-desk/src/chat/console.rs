//! Line-oriented support chat console.
//!
//! Every input line is sent as a message, except the slash commands
//! `/clear`, `/help` and `/quit`. Transcript changes are written as they are
//! broadcast. When input ends the console stays until the replies already
//! scheduled have arrived.

use super::{ChatMessage, ChatResponder, ChatUpdate, Sender};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Help text printed by `/help`.
pub const HELP: &str = "type a message and press enter | /clear | /help | /quit";

/// Shown when the transcript is empty.
pub const EMPTY_TRANSCRIPT: &str =
    "No messages yet. Start a conversation with our support team.";

/// Renders one transcript line.
///
/// ```
/// use support_desk::chat::console::render_message;
/// use support_desk::chat::welcome_messages;
///
/// let first = &welcome_messages()[0];
/// assert_eq!(
///     render_message("Ali", first),
///     "[10:00 AM] Ali: Welcome to Translation Empire support!"
/// );
/// ```
pub fn render_message(agent: &str, message: &ChatMessage) -> String {
    let author = match message.sender {
        Sender::User => "You",
        Sender::Bot => agent,
    };
    format!("[{}] {}: {}", message.timestamp, author, message.text)
}

/// Renders one broadcast update. Typing stopping prints nothing since the
/// reply line follows.
pub fn render_update(agent: &str, update: &ChatUpdate) -> Option<String> {
    match update {
        ChatUpdate::Message(message) if message.sender == Sender::User => None,
        ChatUpdate::Message(message) => Some(render_message(agent, message)),
        ChatUpdate::Typing(true) => Some(format!("{} is typing...", agent)),
        ChatUpdate::Typing(false) => None,
        ChatUpdate::Cleared => Some(format!("Chat cleared. {}", EMPTY_TRANSCRIPT)),
    }
}

/// Drives `responder` from `reader` until `/quit`, or until input ends and
/// no reply is pending.
pub async fn run<R, W>(
    responder: &ChatResponder,
    agent: &str,
    reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut updates = responder.subscribe();
    let mut lines = reader.lines();
    let mut input_open = true;

    write_line(&mut writer, &format!("{} - Online & Ready", agent)).await?;
    let transcript = responder.messages().await;
    if transcript.is_empty() {
        write_line(&mut writer, EMPTY_TRANSCRIPT).await?;
    }
    for message in &transcript {
        write_line(&mut writer, &render_message(agent, message)).await?;
    }

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    tracing::debug!("chat input closed");
                    input_open = false;
                    if responder.pending_replies().await == 0 {
                        break;
                    }
                    continue;
                };
                match line.trim() {
                    "/quit" | "/exit" => break,
                    "/help" => write_line(&mut writer, HELP).await?,
                    "/clear" => {
                        responder.clear().await;
                    }
                    _ => {
                        responder.send(&line).await;
                    }
                }
            }
            update = updates.recv() => match update {
                Ok(update) => {
                    if let Some(text) = render_update(agent, &update) {
                        write_line(&mut writer, &text).await?;
                    }
                    if !input_open && responder.pending_replies().await == 0 {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "chat console fell behind updates");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    loop {
        match updates.try_recv() {
            Ok(update) => {
                if let Some(text) = render_update(agent, &update) {
                    write_line(&mut writer, &text).await?;
                }
            }
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }

    writer.flush().await
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
