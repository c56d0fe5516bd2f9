//! Error types for collection loading

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that abort a load run
#[derive(Error, Debug)]
pub enum ClientError {
    /// Start URL or `next` cursor could not be used
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// Offending URL text
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request to {url} returned status {status}")]
    UnexpectedStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Body was not a page of items
    #[error("Malformed response from {url}: {message}")]
    MalformedResponse {
        /// Requested URL
        url: String,
        /// Parser message
        message: String,
    },

    /// Load followed more pages than allowed
    #[error("Page limit of {limit} exceeded while loading {start}")]
    PageLimitExceeded {
        /// Configured maximum
        limit: usize,
        /// Start URL of the run
        start: String,
    },
}

impl ClientError {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(url: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a malformed response error
    pub fn malformed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Whether the failure came from the network rather than the payload
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::UnexpectedStatus { .. })
    }
}
