//! `call` command: interactive call console on stdin/stdout.

use super::run_interactive;
use std::process::ExitCode;
use support_desk::config::schema::Config;
use support_desk::console::{self, Contact};
use support_desk::session::SessionController;
use tokio::io::BufReader;

/// Runs the call console until `quit`, end of input or Ctrl-C.
pub(crate) fn run_call_command(config: &Config, contact_override: Option<String>) -> ExitCode {
    let timings = match config.session.timings() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let contact = match contact_override {
        Some(name) => Contact::named(name),
        None => Contact {
            name: config.session.contact_name.clone(),
            initials: config.session.contact_initials.clone(),
        },
    };

    run_interactive(|| async move {
        let controller = SessionController::new(timings);
        let stdin = BufReader::new(tokio::io::stdin());
        console::run(&controller, &contact, stdin, tokio::io::stdout()).await
    })
}
