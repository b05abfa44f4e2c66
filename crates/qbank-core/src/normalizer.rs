//! Response normalization for local server calls
//!
//! Every local call settles through [`ResponseNormalizer::normalize`]:
//! - success hands back the payload, never the response wrapper
//! - failure is classified once, reported on the notification surface unless
//!   the [`SuppressionPolicy`] matches its path, and always returned as an error

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::transport::{RawResponse, TransportError};

/// Message shown when neither the server nor the transport has anything better
pub const FALLBACK_MESSAGE: &str = "请求失败";

/// Path fragment of the favorites sub-resource
pub const FAVORITES_PATH: &str = "/favorites";

/// Where a failure originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorOrigin {
    /// No response: unreachable server, timeout, malformed request
    Network,
    /// The server answered with a non-2xx status
    Server,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorOrigin::Network => write!(f, "network"),
            ErrorOrigin::Server => write!(f, "server"),
        }
    }
}

/// Structured description of one failed local call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorClassification {
    pub origin: ErrorOrigin,
    pub status: Option<u16>,
    /// Server detail, else transport message, else [`FALLBACK_MESSAGE`]
    pub message: String,
    pub path: String,
}

impl ErrorClassification {
    pub fn from_transport(error: &TransportError) -> Self {
        let origin = if error.is_network() {
            ErrorOrigin::Network
        } else {
            ErrorOrigin::Server
        };

        let message = error
            .body()
            .and_then(server_detail)
            .or_else(|| {
                let message = error.to_string();
                (!message.trim().is_empty()).then_some(message)
            })
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

        Self {
            origin,
            status: error.status(),
            message,
            path: error.path().to_string(),
        }
    }
}

impl fmt::Display for ErrorClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} error on {}", self.message, self.origin, self.path)?;
        if let Some(status) = self.status {
            write!(f, ", status {}", status)?;
        }
        write!(f, ")")
    }
}

/// Pull the `detail` field out of an error body.
///
/// Plain strings are used as-is; validation errors (a list of objects with a
/// `msg` field) are joined.
fn server_detail(body: &[u8]) -> Option<String> {
    let json: Value = serde_json::from_slice(body).ok()?;
    let detail = match json.get("detail")? {
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };

    (!detail.trim().is_empty()).then_some(detail)
}

/// Decides which failures stay off the notification surface.
///
/// Matching is a plain substring test on the request path, so any path that
/// merely contains a pattern is suppressed too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionPolicy {
    patterns: Vec<String>,
}

impl Default for SuppressionPolicy {
    fn default() -> Self {
        Self {
            patterns: vec![FAVORITES_PATH.to_string()],
        }
    }
}

impl SuppressionPolicy {
    /// A policy that suppresses nothing
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn suppresses(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| path.contains(pattern.as_str()))
    }
}

/// The user-visible error channel
pub trait Notifier: Send + Sync + fmt::Debug {
    fn error(&self, message: &str);
}

/// Notifier that reports through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(target: "qbank::notify", "{}", message);
    }
}

/// Turns raw local outcomes into payloads or classified errors
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    policy: SuppressionPolicy,
    notifier: Arc<dyn Notifier>,
}

impl ResponseNormalizer {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            policy: SuppressionPolicy::default(),
            notifier,
        }
    }

    pub fn with_policy(mut self, policy: SuppressionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &SuppressionPolicy {
        &self.policy
    }

    pub fn normalize(&self, outcome: std::result::Result<RawResponse, TransportError>) -> Result<Value> {
        match outcome {
            Ok(response) => Ok(response.json_payload()),
            Err(error) => Err(self.reject(error)),
        }
    }

    fn reject(&self, error: TransportError) -> Error {
        let classification = ErrorClassification::from_transport(&error);
        let suppressed = self.policy.suppresses(&classification.path);

        if suppressed {
            debug!(
                path = %classification.path,
                status = ?classification.status,
                "Suppressed local request failure"
            );
        } else {
            warn!(
                path = %classification.path,
                origin = %classification.origin,
                status = ?classification.status,
                message = %classification.message,
                "Local request failed"
            );
            self.notifier.error(&classification.message);
        }

        Error::Api {
            classification,
            suppressed,
            source: error,
        }
    }
}
