//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path or an explicit path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Support Desk Configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/support-desk/config.toml

# ==============================================================================
# Call session
# ==============================================================================

[session]

# Time between placing a call and the simulated pickup.
# Examples: "3s", "500ms", "1m"
ring_delay = "3s"

# Time the "Call Ended" summary stays up before returning to idle.
end_delay = "3s"

# Period of the elapsed-time counter while connected. Must be non-zero.
tick_interval = "1s"

# Remote party shown in the call console.
contact_name = "Sarah Wilson"
contact_initials = "SW"

# ==============================================================================
# Support chat
# ==============================================================================

[chat]

# Pause before the bot starts typing.
think_delay = "500ms"

# The typing phase lasts a random time between these two bounds.
typing_min = "1500ms"
typing_max = "3500ms"

# Name the bot answers under.
agent_name = "Ali"

# ==============================================================================
# Records API
# ==============================================================================

[api]

# Base URL of the users/posts service (no trailing slash needed).
base_url = "https://jsonplaceholder.typicode.com"

# Per-request timeout.
timeout = "10s"

# ==============================================================================
# Accounts
# ==============================================================================

[accounts]

# Path of the account document. Empty means the platform data directory
# (e.g. ~/.local/share/support-desk/accounts.json). Tilde (~) is expanded.
path = ""

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Logging verbosity when SDESK_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
log_level = "info"
"#;

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// See [`create_default_config_at`].
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Creates (or force-overwrites) the default config file at `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        xdg::ensure_dir(parent).map_err(write_error)?;
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}
