//! HTTP transport for the local and market clients
//!
//! This module provides:
//! - Request descriptors with per-call timeout, content-type and response-type overrides
//! - Percent-encoding of identifiers interpolated into paths
//! - The [`Transport`] seam and its reqwest-backed implementation
//! - Raw responses and raw failures, before any normalization

pub mod error;
pub mod http;
pub mod request;
pub mod response;

pub use error::TransportError;
pub use http::HttpTransport;
pub use request::{
    encode_path_segment, ContentType, FilePart, RequestBody, RequestDescriptor, RequestOptions,
    ResponseType,
};
pub use response::RawResponse;

use async_trait::async_trait;
use std::fmt;

/// Sends one request and reports its raw outcome.
///
/// Implementations perform exactly one exchange per call: no retry, no caching.
/// Non-2xx answers are failures.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError>;
}
