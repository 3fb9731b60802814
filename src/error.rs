//! Error types for the AccessGrid client.
//!
//! All fallible operations in this crate return [`Result`], whose error type
//! distinguishes four situations a caller handles differently:
//!
//! - **Construction errors** ([`AccessGridError::MissingAccountId`],
//!   [`AccessGridError::MissingSecretKey`], [`AccessGridError::InvalidBaseUrl`]):
//!   bad client configuration, raised before any network I/O.
//! - **Transport errors** ([`AccessGridError::Http`]): the request never
//!   produced an HTTP response (DNS failure, connection refused, timeout,
//!   cancellation). Wraps the underlying [`reqwest::Error`].
//! - **API errors** ([`AccessGridError::Api`]): the service answered with a
//!   status of 400 or above. This is a normal result of a rejected request,
//!   carried as data, never a panic.
//! - **Decode errors** ([`AccessGridError::Decode`]): the response body did
//!   not match the expected shape, indicating a client/server contract
//!   mismatch rather than a business rejection.
//!
//! Nothing in this crate retries or logs-and-swallows errors; every failure
//! propagates to the caller.

use std::fmt;

use thiserror::Error;

/// Result type alias for AccessGrid operations.
pub type Result<T> = std::result::Result<T, AccessGridError>;

/// Errors returned by AccessGrid client operations.
#[derive(Debug, Error)]
#[must_use = "errors should be handled or propagated"]
pub enum AccessGridError {
    /// Client was constructed without an account ID.
    #[error("account ID is required")]
    MissingAccountId,

    /// Client was constructed without a secret key.
    #[error("secret key is required")]
    MissingSecretKey,

    /// The configured base URL override could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Request signature computation failed.
    ///
    /// HMAC key initialization is the only failure point; HMAC-SHA256
    /// accepts keys of any length, so this does not occur in practice.
    #[error("request signing failed: {0}")]
    Signature(String),

    /// Request body could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialize(String),

    /// HTTP transport failed before a response was received.
    ///
    /// Covers network failures, timeouts, and cancellation. Never produced
    /// for a completed response, whatever its status code.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a status of 400 or above.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A successful response body did not match the expected shape.
    #[error("malformed API response: {0}")]
    Decode(String),
}

/// Structured error returned by the AccessGrid API.
///
/// Constructed only when the transport observes a response with status 400 or
/// above. The message is extracted best-effort from the response body
/// (`message` field, then `error` field, then the raw body text); the full
/// raw body is retained for diagnostics.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code (always >= 400).
    pub status: u16,
    /// Best-effort human-readable message.
    pub message: String,
    /// Request ID from the response body or `X-Request-ID` header, if any.
    pub request_id: Option<String>,
    /// Complete response body text.
    pub raw_body: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error (status {}): {}", self.status, self.message)?;
        if let Some(request_id) = &self.request_id {
            write!(f, " (request ID: {request_id})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}
