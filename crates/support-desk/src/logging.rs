//! Logging initialization for the support desk binary.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `SDESK_LOG` environment variable. When it is unset or invalid, the level
//! from the `[logging]` config section is used instead.
//!
//! Records emitted through the `log` facade by the `account-store` and
//! `records-api` crates are forwarded to the same subscriber.
//!
//! # Usage
//!
//! ```bash
//! # Debug level
//! SDESK_LOG=debug sdesk call
//!
//! # Module-specific filtering
//! SDESK_LOG=support_desk::session=trace,warn sdesk call
//! ```

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "SDESK_LOG";

/// Build the filter: `SDESK_LOG` if it parses, else `fallback`.
pub fn filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize the tracing subscriber.
///
/// Output is written to stderr so it never interleaves with command output
/// on stdout.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one is left in place.
pub fn init(fallback: &str) -> bool {
    fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
