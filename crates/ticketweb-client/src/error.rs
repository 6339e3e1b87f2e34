//! Client error types.
//!
//! Two failure classes come back from the remote side: the request never got
//! a response ([`ClientError::Transport`]) or the server answered with a
//! non-success status ([`ClientError::Status`]). Neither is retried or
//! translated here; callers decide what to do with them.

use thiserror::Error;

/// Errors produced while building, sending or decoding API requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No response reached the client (connection refused, DNS, TLS, reset).
    #[error("transport error: {reason}")]
    Transport {
        /// Underlying failure.
        reason: String,
    },

    /// The server rejected the request.
    #[error("request rejected with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("failed to decode response: {reason}")]
    Decode {
        /// Decoder message.
        reason: String,
    },

    /// Request payload could not be serialized.
    #[error("failed to encode request: {reason}")]
    Encode {
        /// Encoder message.
        reason: String,
    },

    /// Base URL or request path did not form a valid URL.
    #[error("invalid URL: {reason}")]
    InvalidUrl {
        /// Parser message.
        reason: String,
    },

    /// A header value contained characters HTTP does not allow.
    #[error("invalid header {name}")]
    InvalidHeader {
        /// Header name.
        name: String,
    },

    /// Reading or writing the saved credential failed.
    #[error("token store error: {reason}")]
    TokenStore {
        /// Underlying failure.
        reason: String,
    },
}

impl ClientError {
    /// HTTP status for server rejections. `None` for every other failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server answered and refused the request.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Status { .. })
    }

    /// Returns true if the server refused the credential (401 or 403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl { reason: err.to_string() }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode { reason: err.to_string() }
        } else {
            Self::Transport { reason: err.to_string() }
        }
    }
}
