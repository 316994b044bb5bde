//! Record types returned by the mock records API.
//!
//! Field names follow the JSON served by the API. Unknown fields (address,
//! geo, catchPhrase, ...) are ignored on decode.

use serde::{Deserialize, Serialize};

/// A user-like record from `/users`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Numeric record id.
    pub id: u64,
    /// Full display name.
    pub name: String,
    /// Login handle.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Phone number, free-form.
    pub phone: String,
    /// Website host.
    pub website: String,
    /// Employer.
    pub company: Company,
}

/// Company block nested in [`User`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    /// Company name.
    pub name: String,
}

/// A post-like record from `/posts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Numeric record id.
    pub id: u64,
    /// Id of the authoring [`User`].
    pub user_id: u64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
}
