//! Error types for the records-api crate.

use thiserror::Error;

/// Errors that can occur when fetching records from the remote API.
///
/// Every variant names the resource that was being fetched so the message can
/// be shown to the user as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Failed to fetch {resource}: {message}")]
    Network {
        /// Resource being fetched (e.g. "users").
        resource: String,
        /// Transport error description.
        message: String,
    },

    /// The server answered 404.
    #[error("Failed to fetch {resource}: 404")]
    NotFound {
        /// Resource being fetched.
        resource: String,
    },

    /// The server answered with a 5xx status.
    #[error("Failed to fetch {resource}: {status}")]
    Server {
        /// Resource being fetched.
        resource: String,
        /// HTTP status code.
        status: u16,
    },

    /// The server answered with any other non-success status.
    #[error("Failed to fetch {resource}: {status}")]
    Unexpected {
        /// Resource being fetched.
        resource: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not the JSON shape we expected.
    #[error("Failed to parse {resource}: {message}")]
    Parse {
        /// Resource being fetched.
        resource: String,
        /// Decoder error description.
        message: String,
    },
}

impl ApiError {
    /// HTTP status code carried by this error, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. } | ApiError::Unexpected { status, .. } => Some(*status),
            ApiError::Network { .. } | ApiError::Parse { .. } => None,
        }
    }
}
