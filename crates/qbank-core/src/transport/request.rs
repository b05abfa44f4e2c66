//! Request descriptors and per-call options
//!
//! A [`RequestDescriptor`] is everything a transport needs to perform one call:
//! method, path relative to the client's base address, query pairs, body and
//! the named [`RequestOptions`] overrides.

use std::path::Path;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// Characters left as-is inside an encoded URI component
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for interpolation as a single path segment.
///
/// Reserved characters such as `/`, `?`, `#` and spaces are escaped, so the
/// segment can never split or terminate the path it lands in.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, URI_COMPONENT).to_string()
}

/// Content type override for the request body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Json,
    /// `multipart/form-data`; the encoder appends the boundary parameter
    Multipart,
}

impl ContentType {
    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Multipart => "multipart/form-data",
        }
    }
}

/// How the response body is handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Parsed as JSON, falling back to text
    #[default]
    Json,
    /// Untransformed bytes
    Blob,
}

impl ResponseType {
    /// `Accept` header sent for this response type
    pub fn accept(&self) -> &'static str {
        match self {
            ResponseType::Json => "application/json, text/plain, */*",
            ResponseType::Blob => "application/octet-stream, */*",
        }
    }
}

/// Per-call overrides. `None` means "use the client default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub content_type: Option<ContentType>,
    pub response_type: ResponseType,
}

impl RequestOptions {
    /// Multipart upload with an optional timeout override
    pub fn file_upload(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            content_type: Some(ContentType::Multipart),
            response_type: ResponseType::Json,
        }
    }

    /// Binary download
    pub fn blob() -> Self {
        Self {
            response_type: ResponseType::Blob,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Timeout that applies once the client default is taken into account
    pub fn effective_timeout(&self, default: Duration) -> Duration {
        self.timeout.unwrap_or(default)
    }
}

/// A file sent as one multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl FilePart {
    /// Field name the servers expect uploads under
    pub const DEFAULT_FIELD: &'static str = "file";

    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            field: Self::DEFAULT_FIELD.to_string(),
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    /// Read a file from disk, keeping its file name
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| Error::Io {
            message: format!("Failed to read {}", path.display()),
            source: e,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self::from_bytes(file_name, bytes))
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(FilePart),
}

impl RequestBody {
    /// Short name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            RequestBody::Empty => "empty",
            RequestBody::Json(_) => "JSON",
            RequestBody::Multipart(_) => "multipart",
        }
    }
}

/// One HTTP call, described before it is sent
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the client base address, already encoded
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub options: RequestOptions,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            options: RequestOptions::default(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append one query pair
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append several query pairs, in order
    pub fn query_pairs<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    /// Attach a structured JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| Error::Json {
            message: format!("Failed to encode body for {}", self.path),
            source: e,
        })?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach a file as a multipart body
    pub fn multipart(mut self, file: FilePart) -> Self {
        self.body = RequestBody::Multipart(file);
        self.options.content_type = Some(ContentType::Multipart);
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}
