//! Error types for single API calls.

use thiserror::Error;

/// Errors a single Cloud Controller call can fail with.
///
/// The actor layer passes these through unwrapped unless an operation's
/// contract maps a specific variant (e.g. `ResourceNotFound` on a
/// space-scoped listing becomes a space-not-found error).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The configured API endpoint is not a usable URL.
    #[error("invalid API endpoint: {0}")]
    Endpoint(String),

    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The platform rejected the credentials.
    #[error("not authorized")]
    Unauthorized,

    /// The requested resource does not exist.
    #[error("resource not found")]
    ResourceNotFound,

    /// The platform refused to create a resource that already exists.
    #[error("{description}")]
    ResourceAlreadyExists {
        /// Platform-provided description.
        description: String,
    },

    /// Any other non-success response.
    #[error("API error ({status}): {description}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Platform-provided description.
        description: String,
    },
}
