//! Error types and handling for the CLI

use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from qbank-core
    #[error("{0}")]
    Core(#[from] qbank_core::Error),

    /// Raw marketplace failure, as reported by the market commands
    #[error("Marketplace request to {} failed: {source}", source.path())]
    Market {
        #[source]
        source: qbank_core::TransportError,
    },

    /// File not found
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with context
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a generic error with message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Attach marketplace context to a failed market call
    pub fn market(error: qbank_core::Error) -> Self {
        match error {
            qbank_core::Error::Transport(source) => Self::Market { source },
            other => Self::Core(other),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(core) => match core {
                qbank_core::Error::Api { .. } => 2,
                qbank_core::Error::Transport(_) => 10,
                qbank_core::Error::Configuration { .. } => 5,
                _ => 2,
            },
            Self::Market { .. } => 10,
            Self::FileNotFound { .. } => 3,
            Self::Config(_) => 5,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Whether the message already reached the user through the notifier
    pub fn already_reported(&self) -> bool {
        match self {
            Self::Core(core @ qbank_core::Error::Api { .. }) => !core.is_suppressed(),
            _ => false,
        }
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let message = error.to_string();

    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), message)
    } else {
        format!("Error: {}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbank_core::TransportError;

    #[test]
    fn test_market_failure_formatting() {
        let error = Error::market(qbank_core::Error::Transport(TransportError::Status {
            path: "/banks/9".to_string(),
            status: 404,
            body: Vec::new(),
        }));
        assert!(matches!(error, Error::Market { .. }));

        assert_eq!(error.exit_code(), 10);
        assert!(!error.already_reported());
        assert_eq!(
            format_error(&error, false),
            "Error: Marketplace request to /banks/9 failed: Request failed with status code 404"
        );
    }

    #[test]
    fn test_market_keeps_other_core_errors() {
        let error = Error::market(qbank_core::Error::configuration("bad address"));
        assert!(matches!(error, Error::Core(_)));
        assert_eq!(error.exit_code(), 5);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::config("bad").exit_code(), 5);
        assert_eq!(
            Error::FileNotFound {
                path: PathBuf::from("missing.docx")
            }
            .exit_code(),
            3
        );
        assert_eq!(Error::other("x").exit_code(), 99);
    }
}
