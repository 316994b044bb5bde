//! File-backed account store for the support desk
//!
//! This crate keeps the list of registered accounts, their credentials and
//! the currently logged-in account in a single JSON document on disk. Every
//! operation is a synchronous read-modify-write of that document, so two
//! handles pointing at the same path always agree.
//!
//! Failures carry the message meant for the user (`Email already registered`,
//! `Invalid email or password`, ...). None of them is retried.
//!
//! # Examples
//!
//! ```ignore
//! use account_store::AccountStore;
//!
//! let store = AccountStore::open_default();
//! let user = store.signup("Sarah Wilson", "sarah@example.com", "s3cret")?;
//! assert_eq!(user.avatar.as_deref(), Some("SW"));
//! assert!(store.is_authenticated()?);
//! ```

#![warn(missing_docs)]

mod document;
mod error;
mod password;
mod types;

pub use document::default_path;
pub use error::{AccountError, Result, StorageError};
pub use types::{avatar_initials, ProfileUpdate, User};

use document::{read_document, write_document_atomic};
use std::path::{Path, PathBuf};

/// Message shown after a successful signup.
pub const SIGNUP_SUCCESS: &str = "Account created successfully";

/// Message shown after a successful login.
pub const LOGIN_SUCCESS: &str = "Logged in successfully";

/// Message shown after a successful profile update.
pub const PROFILE_UPDATE_SUCCESS: &str = "Profile updated successfully";

/// Handle to an account document at a fixed path.
///
/// The handle itself holds no account data; it is cheap to clone and every
/// call reads the document fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    /// Open the store backed by the document at `path`.
    ///
    /// The file is not touched until the first operation; a missing file
    /// behaves as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store at [`default_path`].
    pub fn open_default() -> Self {
        Self::open(default_path())
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register a new account and log it in.
    ///
    /// # Errors
    /// * `AccountError::EmailTaken` - An account with this email exists; the
    ///   document is left unchanged
    /// * `AccountError::Storage` - Failed to read or write the document
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let mut doc = read_document(&self.path)?;

        if doc.find_by_email(email).is_some() {
            log::debug!("signup rejected, email already registered: {}", email);
            return Err(AccountError::EmailTaken);
        }

        let now = chrono::Utc::now();
        let mut millis = now.timestamp_millis();
        // Two signups inside the same millisecond must not share an id.
        while doc.users.iter().any(|u| u.id == format!("user-{}", millis)) {
            millis += 1;
        }

        let user = User {
            id: format!("user-{}", millis),
            name: name.to_string(),
            email: email.to_string(),
            avatar: Some(avatar_initials(name)),
            created_at: now.to_rfc3339(),
        };

        doc.credentials
            .insert(email.to_string(), password::hash(password)?);
        doc.users.push(user.clone());
        doc.current_user = Some(user.clone());
        write_document_atomic(&self.path, &doc)?;

        log::info!("account created: {}", user.id);
        Ok(user)
    }

    /// Verify credentials and log the matching account in.
    ///
    /// # Errors
    /// * `AccountError::InvalidCredentials` - Unknown email, no stored
    ///   credentials, or wrong password
    /// * `AccountError::Storage` - Failed to read or write the document
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let mut doc = read_document(&self.path)?;

        let user = doc
            .find_by_email(email)
            .cloned()
            .ok_or(AccountError::InvalidCredentials)?;

        let stored = doc
            .credentials
            .get(email)
            .ok_or(AccountError::InvalidCredentials)?;

        if !password::verify(password, stored) {
            log::debug!("login rejected for {}", email);
            return Err(AccountError::InvalidCredentials);
        }

        doc.current_user = Some(user.clone());
        write_document_atomic(&self.path, &doc)?;
        Ok(user)
    }

    /// Clear the logged-in account. Logging out twice is not an error.
    pub fn logout(&self) -> Result<()> {
        let mut doc = read_document(&self.path)?;
        if doc.current_user.take().is_some() {
            write_document_atomic(&self.path, &doc)?;
        }
        Ok(())
    }

    /// The logged-in account, if any.
    pub fn current_user(&self) -> Result<Option<User>> {
        Ok(read_document(&self.path)?.current_user)
    }

    /// Returns `true` if an account is logged in.
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.current_user()?.is_some())
    }

    /// All registered accounts, in signup order.
    pub fn users(&self) -> Result<Vec<User>> {
        Ok(read_document(&self.path)?.users)
    }

    /// Apply `update` to the logged-in account.
    ///
    /// The stored account and the current-user record are both replaced with
    /// the merged result. Changing the email moves the stored credentials to
    /// the new address.
    ///
    /// # Errors
    /// * `AccountError::NotAuthenticated` - Nobody is logged in
    /// * `AccountError::UserNotFound` - The logged-in account is no longer listed
    /// * `AccountError::EmailTaken` - The new email belongs to another account
    /// * `AccountError::Storage` - Failed to read or write the document
    pub fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        let mut doc = read_document(&self.path)?;

        let current_id = doc
            .current_user
            .as_ref()
            .map(|u| u.id.clone())
            .ok_or(AccountError::NotAuthenticated)?;

        let index = doc
            .users
            .iter()
            .position(|u| u.id == current_id)
            .ok_or(AccountError::UserNotFound)?;

        let old_email = doc.users[index].email.clone();
        if let Some(new_email) = update.email.as_deref() {
            if new_email != old_email && doc.find_by_email(new_email).is_some() {
                return Err(AccountError::EmailTaken);
            }
        }

        let mut updated = doc.users[index].clone();
        update.apply(&mut updated);

        if updated.email != old_email {
            if let Some(hash) = doc.credentials.remove(&old_email) {
                doc.credentials.insert(updated.email.clone(), hash);
            }
        }

        doc.users[index] = updated.clone();
        doc.current_user = Some(updated.clone());
        write_document_atomic(&self.path, &doc)?;
        Ok(updated)
    }
}
