//! Command implementations for the sdesk CLI.
//!
//! This module contains all command handler functions, organized by domain:
//! - `call` - Interactive call console
//! - `chat` - Interactive support chat
//! - `account` - Signup, login, logout, whoami, profile
//! - `records` - Remote users and posts
//! - `config` - Configuration file management

pub(crate) mod account;
pub(crate) mod call;
pub(crate) mod chat;
pub(crate) mod config;
pub(crate) mod records;

pub(crate) use account::*;
pub(crate) use call::*;
pub(crate) use chat::*;
pub(crate) use config::*;
pub(crate) use records::*;

use std::future::Future;
use std::process::ExitCode;

/// Runs an interactive console on a fresh runtime until it returns or
/// Ctrl-C arrives.
///
/// The runtime is shut down without waiting for its blocking pool: a
/// pending stdin read cannot be cancelled and would otherwise keep the
/// process alive until the next line of input.
pub(crate) fn run_interactive<F, Fut>(console: F) -> ExitCode
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(async {
        tokio::select! {
            result = console() => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted, leaving console");
                Ok(())
            }
        }
    });
    rt.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: console I/O failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
