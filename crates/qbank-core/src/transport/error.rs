//! Raw transport failures
//!
//! These are what a transport reports before any classification. Market calls
//! surface them unchanged; local calls wrap them in a classified error.

use std::time::Duration;

use thiserror::Error;

/// A failed exchange. Every variant remembers the request path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The call did not settle within its timeout
    #[error("timeout of {timeout_ms}ms exceeded")]
    Timeout { path: String, timeout_ms: u64 },

    /// The server could not be reached
    #[error("{message}")]
    Connect { path: String, message: String },

    /// The server answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Status {
        path: String,
        status: u16,
        body: Vec<u8>,
    },

    /// Any other failure building, sending or reading the request
    #[error("{message}")]
    Request { path: String, message: String },
}

impl TransportError {
    /// Create from a reqwest error raised while performing `path`
    pub fn from_reqwest(path: &str, timeout: Duration, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                path: path.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }
        } else if error.is_connect() {
            Self::Connect {
                path: path.to_string(),
                message: error.to_string(),
            }
        } else {
            Self::Request {
                path: path.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Path of the request that failed
    pub fn path(&self) -> &str {
        match self {
            Self::Timeout { path, .. }
            | Self::Connect { path, .. }
            | Self::Status { path, .. }
            | Self::Request { path, .. } => path,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a status failure
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True when no response was received
    pub fn is_network(&self) -> bool {
        !matches!(self, Self::Status { .. })
    }
}
