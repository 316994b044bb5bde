//! # records-api
//!
//! A small read-only client for the mock records API that backs the support
//! desk's tables: a `/users` collection and a `/posts` collection.
//!
//! ## Example
//!
//! ```rust,ignore
//! use records_api::Client;
//!
//! let client = Client::default();
//! for user in client.fetch_users()? {
//!     println!("{} <{}>", user.name, user.email);
//! }
//! ```

mod client;
mod error;
mod types;

#[cfg(feature = "blocking")]
pub use client::Client;
pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use types::{Company, Post, User};
