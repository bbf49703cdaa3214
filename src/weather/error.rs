//! Lookup error types

use thiserror::Error;

/// External lookup failure with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LookupError {
    pub kind: LookupErrorKind,
    pub message: String,
}

impl LookupError {
    pub fn new(kind: LookupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Network, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Status, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(LookupErrorKind::Decode, message)
    }

    /// Classify a transport-level failure from the HTTP client
    pub fn from_reqwest(service: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network(format!("{service} request timeout: {err}"))
        } else if err.is_connect() {
            Self::network(format!("{service} connection failed: {err}"))
        } else if err.is_decode() {
            Self::decode(format!("{service} response unreadable: {err}"))
        } else {
            Self::network(format!("{service} request failed: {err}"))
        }
    }

    /// Build an error for a non-success HTTP status
    pub fn from_status(service: &str, status: reqwest::StatusCode, body: &str) -> Self {
        Self::status(format!("{service} returned HTTP {status}: {body}"))
    }
}

/// Error classification, used for logging only; lookups are never retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// Unreachable host, timeout, broken connection
    Network,
    /// Service answered with a non-2xx status
    Status,
    /// Service answered 2xx but the payload was not what we expect
    Decode,
}

impl LookupErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Status => "status",
            Self::Decode => "decode",
        }
    }
}
