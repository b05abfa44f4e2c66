//! reqwest-backed transport bound to one base address

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::Client as ReqwestClient;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Error, Result};
use crate::transport::{
    ContentType, FilePart, RawResponse, RequestBody, RequestDescriptor, Transport, TransportError,
};

/// HTTP transport with a base address and a default timeout.
///
/// Holds no per-call state; share it freely behind an `Arc`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: ReqwestClient,
    base_url: String,
    default_timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: &str, default_timeout: Duration) -> Result<Self> {
        Url::parse(base_url).map_err(|e| Error::Configuration {
            message: format!("Invalid base URL: {}", base_url),
            source: Some(e.into()),
        })?;

        let client = ReqwestClient::builder()
            .timeout(default_timeout)
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e.into()),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Join the base address and an already-encoded path.
    ///
    /// Plain concatenation: the base path is kept, as `Url::join` would drop it.
    fn build_url(&self, path: &str) -> std::result::Result<Url, TransportError> {
        let joined = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };

        Url::parse(&joined).map_err(|e| TransportError::Request {
            path: path.to_string(),
            message: format!("Invalid request URL {}: {}", joined, e),
        })
    }
}

fn multipart_form(path: &str, file: FilePart) -> std::result::Result<Form, TransportError> {
    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(mime) = &file.mime {
        part = part.mime_str(mime).map_err(|e| TransportError::Request {
            path: path.to_string(),
            message: format!("Invalid file type {}: {}", mime, e),
        })?;
    }
    Ok(Form::new().part(file.field, part))
}

/// Reject a body that contradicts an explicit content type
fn check_content_type(
    path: &str,
    content_type: Option<ContentType>,
    body: &RequestBody,
) -> std::result::Result<(), TransportError> {
    let Some(content_type) = content_type else {
        return Ok(());
    };
    let matches = match content_type {
        ContentType::Json => matches!(body, RequestBody::Json(_) | RequestBody::Empty),
        ContentType::Multipart => matches!(body, RequestBody::Multipart(_)),
    };
    if matches {
        Ok(())
    } else {
        Err(TransportError::Request {
            path: path.to_string(),
            message: format!(
                "Cannot send a {} body as {}",
                body.kind(),
                content_type.mime()
            ),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(
        &self,
        request: RequestDescriptor,
    ) -> std::result::Result<RawResponse, TransportError> {
        let RequestDescriptor {
            method,
            path,
            query,
            body,
            options,
        } = request;

        check_content_type(&path, options.content_type, &body)?;

        let timeout = options.effective_timeout(self.default_timeout);
        let url = self.build_url(&path)?;
        debug!(
            timeout_ms = timeout.as_millis() as u64,
            response_type = ?options.response_type,
            "Sending request"
        );

        let mut builder = self
            .client
            .request(method, url)
            .timeout(timeout)
            .header(ACCEPT, options.response_type.accept());
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            // reqwest keeps an explicit content type and only fills in a missing one
            RequestBody::Json(value) => match options.content_type {
                Some(content_type) => builder.header(CONTENT_TYPE, content_type.mime()).json(&value),
                None => builder.json(&value),
            },
            RequestBody::Multipart(file) => builder.multipart(multipart_form(&path, file)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&path, timeout, e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(&path, timeout, e))?
            .to_vec();

        debug!(status, bytes = body.len(), "Request settled");

        let response = RawResponse {
            status,
            content_type,
            body,
        };
        if response.is_success() {
            Ok(response)
        } else {
            Err(TransportError::Status {
                path,
                status,
                body: response.body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_keeps_base_path() {
        let transport =
            HttpTransport::new("http://127.0.0.1:8000/api/", Duration::from_secs(30)).unwrap();
        assert_eq!(transport.base_url(), "http://127.0.0.1:8000/api");

        let url = transport.build_url("/banks/7/chapters/Unit%201%2FIntro").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/banks/7/chapters/Unit%201%2FIntro");

        let url = transport.build_url("categories").unwrap();
        assert_eq!(url.path(), "/api/categories");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpTransport::new("/api", Duration::from_secs(30));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_content_type_must_match_body() {
        let json = RequestBody::Json(serde_json::json!({"content": "1+1=?"}));
        let file = RequestBody::Multipart(FilePart::from_bytes("a.txt", b"x".to_vec()));

        assert!(check_content_type("/ai/parse", None, &json).is_ok());
        assert!(check_content_type("/ai/parse", Some(ContentType::Json), &json).is_ok());
        assert!(check_content_type("/favorites/1/2", Some(ContentType::Json), &RequestBody::Empty).is_ok());
        assert!(check_content_type("/ai/parse-file", Some(ContentType::Multipart), &file).is_ok());

        let err = check_content_type("/ai/parse", Some(ContentType::Multipart), &json).unwrap_err();
        assert_eq!(err.to_string(), "Cannot send a JSON body as multipart/form-data");
        assert_eq!(err.path(), "/ai/parse");

        assert!(check_content_type("/ai/parse-file", Some(ContentType::Json), &file).is_err());
        assert!(
            check_content_type("/market/upload", Some(ContentType::Multipart), &RequestBody::Empty)
                .is_err()
        );
    }

    #[test]
    fn test_multipart_form_rejects_bad_mime() {
        let file = FilePart::from_bytes("a.txt", b"x".to_vec()).with_mime("not a mime");
        assert!(multipart_form("/ai/parse-file", file).is_err());
    }
}
