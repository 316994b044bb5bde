//! HTTP client for the mock records API.
//!
//! This module provides blocking GET helpers for the `/users` and `/posts`
//! collections. It handles URL building, status mapping and JSON decoding.
//! Failures are logged and returned; nothing is retried.

use crate::error::ApiError;
use crate::types::{Post, User};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Public mock API serving the users and posts collections.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Request timeout used by [`Client::default`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking client bound to one API base URL.
///
/// # Example
///
/// ```rust,ignore
/// use records_api::Client;
///
/// let client = Client::default();
/// let posts = client.fetch_posts(Some(5))?;
/// assert!(posts.len() <= 5);
/// ```
#[cfg(feature = "blocking")]
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[cfg(feature = "blocking")]
impl Client {
    /// Creates a client for `base_url` with the default timeout.
    ///
    /// A trailing `/` on the base URL is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client for `base_url` whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                log::warn!("falling back to default HTTP client: {}", e);
                reqwest::blocking::Client::new()
            });
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Base URL requests are sent to, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every record of the `/users` collection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-200 status or a body
    /// that does not decode as a list of users.
    pub fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json("/users", "users")
    }

    /// Fetch posts, optionally capped to the first `limit` records.
    ///
    /// A limit of `None` fetches the whole collection. `Some(0)` is sent
    /// as-is; the server decides what an empty page looks like.
    pub fn fetch_posts(&self, limit: Option<u32>) -> Result<Vec<Post>, ApiError> {
        let path = posts_path(limit);
        self.get_json(&path, "posts")
    }

    /// Fetch a single user by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the id does not exist.
    pub fn fetch_user_by_id(&self, id: u64) -> Result<User, ApiError> {
        self.get_json(&format!("/users/{}", id), &format!("user {}", id))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, resource: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let result = self
            .http
            .get(&url)
            .send()
            .map_err(|e| ApiError::Network {
                resource: resource.to_string(),
                message: e.to_string(),
            })
            .and_then(|response| map_response(response, resource))
            .and_then(|body| {
                serde_json::from_str(&body).map_err(|e| ApiError::Parse {
                    resource: resource.to_string(),
                    message: e.to_string(),
                })
            });

        if let Err(e) = &result {
            log::error!("Error fetching {}: {}", resource, e);
        }
        result
    }
}

#[cfg(feature = "blocking")]
impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Map HTTP response to body text, handling error status codes.
#[cfg(feature = "blocking")]
fn map_response(response: reqwest::blocking::Response, resource: &str) -> Result<String, ApiError> {
    let status = response.status().as_u16();

    match status {
        200..=299 => response.text().map_err(|e| ApiError::Network {
            resource: resource.to_string(),
            message: e.to_string(),
        }),
        404 => Err(ApiError::NotFound {
            resource: resource.to_string(),
        }),
        500..=599 => Err(ApiError::Server {
            resource: resource.to_string(),
            status,
        }),
        _ => Err(ApiError::Unexpected {
            resource: resource.to_string(),
            status,
        }),
    }
}

fn posts_path(limit: Option<u32>) -> String {
    match limit {
        Some(n) => format!("/posts?_limit={}", n),
        None => "/posts".to_string(),
    }
}
