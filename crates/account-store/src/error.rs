//! Error types for account-store
//!
//! Account errors carry the exact message shown to the user. Storage errors
//! cover the backing document and are wrapped transparently.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type
#[derive(Debug, Error)]
pub enum AccountError {
    /// Signup with an email that already has an account
    #[error("Email already registered")]
    EmailTaken,

    /// Unknown email, missing credentials or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Operation requires a logged-in account
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Logged-in account is no longer in the account list
    #[error("User not found")]
    UserNotFound,

    /// Backing document error
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Backing document errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error reading or writing the document
    #[error("Failed to access account store: {0}")]
    Io(#[source] std::io::Error),

    /// Document is not valid JSON for the expected schema
    #[error("Failed to parse account store: {0}")]
    Parse(String),

    /// Rename of the temp file over the document failed
    #[error("Failed to write account store atomically: {path} - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Path to the document
        path: PathBuf,
        /// Path to the temporary safety copy
        temp_path: PathBuf,
    },

    /// Password hashing backend failure
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// Result type alias for account-store operations
pub type Result<T> = std::result::Result<T, AccountError>;
