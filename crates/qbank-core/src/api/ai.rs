//! AI-assisted question import and generation

use std::time::Duration;

use serde_json::{json, Value};

use crate::client::LocalClient;
use crate::error::Result;
use crate::models::{AiCheckParams, AiGenerateRequest};
use crate::transport::{FilePart, RequestDescriptor, RequestOptions};

#[derive(Debug, Clone)]
pub struct AiApi {
    client: LocalClient,
    file_parse_timeout: Duration,
}

impl AiApi {
    /// `file_parse_timeout` replaces the client default for [`parse_file`](Self::parse_file)
    pub fn new(client: LocalClient, file_parse_timeout: Duration) -> Self {
        Self {
            client,
            file_parse_timeout,
        }
    }

    /// Extract questions from pasted text
    pub async fn parse(&self, content: &str) -> Result<Value> {
        let request = RequestDescriptor::post("/ai/parse").json(&json!({ "content": content }))?;
        self.client.call(request).await
    }

    /// Extract questions from an uploaded document or image.
    ///
    /// Parsing runs server-side and is slow, so this call is multipart with the
    /// extended timeout regardless of the client defaults.
    pub async fn parse_file(&self, file: FilePart) -> Result<Value> {
        let request = RequestDescriptor::post("/ai/parse-file")
            .multipart(file)
            .options(RequestOptions::file_upload(Some(self.file_parse_timeout)));
        self.client.call(request).await
    }

    pub async fn get_supported_types(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/ai/supported-types")).await
    }

    pub async fn generate(&self, request: &AiGenerateRequest) -> Result<Value> {
        self.client
            .call(RequestDescriptor::post("/ai/generate").json(request)?)
            .await
    }

    /// Test AI settings before saving them
    pub async fn check_connection(&self, params: &AiCheckParams) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get("/ai/check").query_pairs(params.to_query()))
            .await
    }
}
