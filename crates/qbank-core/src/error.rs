//! Error types for the QBank core library
//!
//! Local server calls fail with [`Error::Api`], which carries the
//! [`ErrorClassification`] built by the response normalizer together with the
//! raw transport failure. Marketplace calls fail with [`Error::Transport`],
//! the raw failure as it came off the wire.

use thiserror::Error;

use crate::normalizer::ErrorClassification;
use crate::transport::TransportError;

/// Main error type for QBank operations
#[derive(Error, Debug)]
pub enum Error {
    /// Classified failure of a local application server call
    #[error("API error: {classification}")]
    Api {
        classification: ErrorClassification,
        /// Whether the notification surface was skipped for this failure
        suppressed: bool,
        #[source]
        source: TransportError,
    },

    /// Unclassified failure of a marketplace call
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A descriptor handed to a client that cannot serve it; nothing was sent
    #[error("Invalid request to {path}: {message}")]
    InvalidRequest { path: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON serialization and payload decoding errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn wrong_response_type(path: &str, expected: &str) -> Self {
        Self::InvalidRequest {
            path: path.to_string(),
            message: format!("response type must be {}", expected),
        }
    }

    /// Classification of a local call failure, if this is one
    pub fn classification(&self) -> Option<&ErrorClassification> {
        match self {
            Self::Api { classification, .. } => Some(classification),
            _ => None,
        }
    }

    /// True when the failure was kept off the notification surface
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Api { suppressed: true, .. })
    }

    /// HTTP status of the failed call, when the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { classification, .. } => classification.status,
            Self::Transport(error) => error.status(),
            _ => None,
        }
    }

    /// The raw transport failure behind this error
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            Self::Api { source, .. } => Some(source),
            Self::Transport(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::ErrorOrigin;

    fn not_found() -> TransportError {
        TransportError::Status {
            path: "/banks/1".to_string(),
            status: 404,
            body: br#"{"detail":"not here"}"#.to_vec(),
        }
    }

    #[test]
    fn test_api_error_accessors() {
        let source = not_found();
        let err = Error::Api {
            classification: ErrorClassification::from_transport(&source),
            suppressed: false,
            source,
        };

        assert_eq!(err.status_code(), Some(404));
        assert!(!err.is_suppressed());
        assert_eq!(err.classification().map(|c| c.origin), Some(ErrorOrigin::Server));
        assert!(err.to_string().contains("not here"));
    }

    #[test]
    fn test_transport_error_is_forwarded_verbatim() {
        let err = Error::from(not_found());
        assert!(err.classification().is_none());
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }
}
