//! `chat` command: support chat on stdin/stdout.

use super::run_interactive;
use std::process::ExitCode;
use support_desk::chat::{console, ChatResponder};
use support_desk::config::schema::Config;
use tokio::io::BufReader;

/// Runs the support chat until `/quit`, Ctrl-C, or end of input once the
/// last reply has arrived.
pub(crate) fn run_chat_command(config: &Config, agent_override: Option<String>) -> ExitCode {
    let timings = match config.chat.timings() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let agent = agent_override.unwrap_or_else(|| config.chat.agent_name.clone());

    run_interactive(|| async move {
        let responder = ChatResponder::new(timings);
        let stdin = BufReader::new(tokio::io::stdin());
        console::run(&responder, &agent, stdin, tokio::io::stdout()).await
    })
}
