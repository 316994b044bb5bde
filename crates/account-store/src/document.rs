//! Account document I/O
//!
//! The whole store is one JSON document holding three keys: the list of
//! registered users, the credential map (email to password hash) and the
//! currently logged-in user. Reads tolerate a missing file; writes go through
//! temp-file-then-rename so a crash never leaves a half-written document.
//!
//! Document format:
//! ```json
//! {
//!   "users": [{ "id": "user-1718000000000", "name": "...", "email": "...", "createdAt": "..." }],
//!   "credentials": { "someone@example.com": "$argon2id$v=19$..." },
//!   "currentUser": null
//! }
//! ```

use crate::error::StorageError;
use crate::types::User;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory form of the account document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Document {
    pub users: Vec<User>,
    pub credentials: BTreeMap<String, String>,
    pub current_user: Option<User>,
}

impl Document {
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }
}

/// Returns the default location of the account document
///
/// Uses XDG data directory conventions:
/// - macOS: `~/Library/Application Support/support-desk/accounts.json`
/// - Linux: `~/.local/share/support-desk/accounts.json` (or `$XDG_DATA_HOME/...`)
///
/// Falls back to the current directory when no data directory is known.
pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("support-desk")
        .join("accounts.json")
}

/// Read the document at `path`
///
/// Returns an empty document if the file doesn't exist yet (first run).
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read.
/// Returns `StorageError::Parse` if the JSON is malformed.
pub(crate) fn read_document(path: &Path) -> Result<Document, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no account document at {}, starting empty", path.display());
            return Ok(Document::default());
        }
        Err(e) => return Err(StorageError::Io(e)),
    };

    if content.trim().is_empty() {
        return Ok(Document::default());
    }

    serde_json::from_str(&content).map_err(|e| StorageError::Parse(e.to_string()))
}

/// Write the document atomically with temp-file-then-rename
///
/// 1. Write to temp file with timestamp suffix
/// 2. Fsync to disk
/// 3. Rename temp to original
///
/// On failure before rename, the temp file is preserved as a safety copy.
///
/// # Errors
///
/// Returns `StorageError::Parse` if the document cannot be serialized.
/// Returns `StorageError::Io` if the file cannot be written or synced.
/// Returns `StorageError::WriteAtomic` if the rename fails.
pub(crate) fn write_document_atomic(path: &Path, document: &Document) -> Result<(), StorageError> {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "accounts.json".to_string());
    let temp_path = path.with_file_name(format!("{}.tmp.{}", file_name, timestamp));

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
    }

    let json =
        serde_json::to_string_pretty(document).map_err(|e| StorageError::Parse(e.to_string()))?;

    fs::write(&temp_path, json).map_err(StorageError::Io)?;

    let file = fs::File::open(&temp_path).map_err(StorageError::Io)?;
    file.sync_all().map_err(StorageError::Io)?;

    fs::rename(&temp_path, path).map_err(|_| StorageError::WriteAtomic {
        path: path.to_path_buf(),
        temp_path: temp_path.clone(),
    })?;

    Ok(())
}
