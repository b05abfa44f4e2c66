//! QBank Core - access layer for the question-bank application
//!
//! This crate mediates between front ends and the two backend surfaces the
//! application talks to:
//!
//! - the **local application server**, reached through a [`LocalClient`] whose
//!   every outcome passes through the [`ResponseNormalizer`]
//! - the **marketplace service**, reached through a [`MarketClient`] that hands
//!   payloads and raw failures straight back to the caller
//!
//! # Main Components
//!
//! - **Transport**: request descriptors, per-call options and the reqwest-backed
//!   [`HttpTransport`]
//! - **Normalizer**: payload unwrapping, error classification, suppression policy
//!   and the notification seam
//! - **Facades**: one typed function per backend operation, grouped by resource
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use qbank_core::{ApiClients, ClientConfig, TracingNotifier};
//!
//! # async fn example() -> qbank_core::Result<()> {
//! let clients = ApiClients::from_config(&ClientConfig::from_env(), Arc::new(TracingNotifier))?;
//! let banks = clients.banks().get_all().await?;
//! println!("{banks}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{
    AiApi, BankApi, ConfigApi, DataApi, ExamApi, FavoriteApi, MarketApi, PaperApi, ResultApi,
    SystemApi,
};
pub use client::{ApiClients, LocalClient, MarketClient};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use normalizer::{
    ErrorClassification, ErrorOrigin, Notifier, ResponseNormalizer, SuppressionPolicy,
    TracingNotifier,
};
pub use transport::{
    encode_path_segment, ContentType, FilePart, HttpTransport, RawResponse, RequestBody,
    RequestDescriptor, RequestOptions, ResponseType, Transport, TransportError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::configuration("missing base url");
        assert!(err.to_string().contains("missing base url"));
        assert!(err.classification().is_none());
    }
}
