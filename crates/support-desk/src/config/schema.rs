//! TOML configuration schema types for the support desk.
//!
//! All structs derive `Deserialize` and `Serialize` with sensible defaults via
//! `#[serde(default)]`, so a partial file (or none at all) still yields a
//! complete `Config`.
//!
//! Duration fields use human-readable strings (e.g. `"3s"`, `"250ms"`)
//! parsed by the `humantime` crate; [`Config::validate`] rejects the ones
//! that do not parse.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::error::ConfigError;
use crate::config::xdg;
use crate::chat::ChatTimings;
use crate::SessionTimings;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [session]
/// [chat]
/// [api]
/// [accounts]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulated call timings and the contact shown in the console.
    pub session: SessionConfig,
    /// Support chat bot timings.
    pub chat: ChatConfig,
    /// Remote records service.
    pub api: ApiConfig,
    /// Local account document.
    pub accounts: AccountsConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks every field that needs more than a type check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session.timings()?;
        self.chat.timings()?;
        self.api.timeout()?;
        Ok(())
    }
}

/// Parses a humantime string, naming `field` in the error.
pub(crate) fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Call simulation settings from the `[session]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Ringing → Connected delay (default `"3s"`).
    pub ring_delay: String,
    /// Ended → Idle delay (default `"3s"`).
    pub end_delay: String,
    /// Elapsed-time tick period (default `"1s"`). Must be non-zero.
    pub tick_interval: String,
    /// Display name of the remote party.
    pub contact_name: String,
    /// Initials shown next to the contact name.
    pub contact_initials: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ring_delay: "3s".to_string(),
            end_delay: "3s".to_string(),
            tick_interval: "1s".to_string(),
            contact_name: "Sarah Wilson".to_string(),
            contact_initials: "SW".to_string(),
        }
    }
}

impl SessionConfig {
    /// Parsed timer settings.
    pub fn timings(&self) -> Result<SessionTimings, ConfigError> {
        let tick_interval = parse_duration("session.tick_interval", &self.tick_interval)?;
        if tick_interval.is_zero() {
            return Err(ConfigError::InvalidDuration {
                field: "session.tick_interval",
                value: self.tick_interval.clone(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(SessionTimings {
            ring_delay: parse_duration("session.ring_delay", &self.ring_delay)?,
            end_delay: parse_duration("session.end_delay", &self.end_delay)?,
            tick_interval,
        })
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// Support chat settings from the `[chat]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    /// Pause before the bot starts typing (default `"500ms"`).
    pub think_delay: String,
    /// Shortest typing phase (default `"1500ms"`).
    pub typing_min: String,
    /// Longest typing phase (default `"3500ms"`). Must not be below `typing_min`.
    pub typing_max: String,
    /// Name the bot answers under.
    pub agent_name: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            think_delay: "500ms".to_string(),
            typing_min: "1500ms".to_string(),
            typing_max: "3500ms".to_string(),
            agent_name: "Ali".to_string(),
        }
    }
}

impl ChatConfig {
    /// Parsed bot timings.
    pub fn timings(&self) -> Result<ChatTimings, ConfigError> {
        let typing_min = parse_duration("chat.typing_min", &self.typing_min)?;
        let typing_max = parse_duration("chat.typing_max", &self.typing_max)?;
        if typing_max < typing_min {
            return Err(ConfigError::InvalidDuration {
                field: "chat.typing_max",
                value: self.typing_max.clone(),
                message: "must not be below chat.typing_min".to_string(),
            });
        }
        Ok(ChatTimings {
            think_delay: parse_duration("chat.think_delay", &self.think_delay)?,
            typing_min,
            typing_max,
        })
    }
}

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

/// Records service settings from the `[api]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Request timeout (default `"10s"`).
    pub timeout: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: records_api::DEFAULT_BASE_URL.to_string(),
            timeout: "10s".to_string(),
        }
    }
}

impl ApiConfig {
    /// Parsed request timeout.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("api.timeout", &self.timeout)
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Account document location from the `[accounts]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AccountsConfig {
    /// Path to the JSON document. Empty means the platform data directory.
    /// Tilde (`~`) is expanded.
    pub path: String,
}

impl AccountsConfig {
    /// Path the account store should open.
    pub fn resolved_path(&self) -> PathBuf {
        if self.path.trim().is_empty() {
            account_store::default_path()
        } else {
            xdg::expand_tilde(&self.path)
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log settings from the `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Verbosity used when `SDESK_LOG` is not set.
    pub log_level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
