//! Core domain types for account-store

use serde::{Deserialize, Serialize};

/// A registered account as shown to the rest of the application.
///
/// Credentials are never part of this type; they live in a separate map of
/// the backing document keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier, `user-<unix millis>`
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email (unique across accounts)
    pub email: String,
    /// Initials shown in place of a picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

/// Partial update applied over a stored [`User`].
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New login email
    pub email: Option<String>,
    /// New avatar initials
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.avatar.is_none()
    }

    pub(crate) fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = Some(avatar);
        }
    }
}

/// Build avatar initials from a display name.
///
/// Takes the first character of each whitespace-separated word, upper-cases
/// them and keeps at most two.
///
/// ```
/// use account_store::avatar_initials;
///
/// assert_eq!(avatar_initials("Sarah Wilson"), "SW");
/// assert_eq!(avatar_initials("ayesha bint malik khan"), "AB");
/// assert_eq!(avatar_initials("Abdullah"), "A");
/// ```
pub fn avatar_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}
