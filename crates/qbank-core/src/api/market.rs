//! Remote question-bank marketplace
//!
//! These calls bypass the response normalizer: payloads come back as-is and
//! failures come back as raw [`TransportError`](crate::TransportError)s for
//! the caller to handle. Nothing here touches the notification surface.

use std::fmt::Display;

use serde_json::Value;

use crate::api::segment;
use crate::client::MarketClient;
use crate::error::Result;
use crate::models::MarketQuery;
use crate::transport::{FilePart, RequestDescriptor, RequestOptions};

/// Number of questions returned by a preview unless asked otherwise
pub const DEFAULT_PREVIEW_LIMIT: u32 = 5;

#[derive(Debug, Clone)]
pub struct MarketApi {
    client: MarketClient,
}

impl MarketApi {
    pub fn new(client: MarketClient) -> Self {
        Self { client }
    }

    pub async fn get_banks(&self, query: &MarketQuery) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get("/banks").query_pairs(query.to_query()))
            .await
    }

    pub async fn get_bank(&self, id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get(format!("/banks/{}", segment(id))))
            .await
    }

    /// First `limit` questions of a bank
    pub async fn preview_bank(&self, id: impl Display, limit: Option<u32>) -> Result<Value> {
        let request = RequestDescriptor::get(format!("/banks/{}/preview", segment(id)))
            .query("limit", limit.unwrap_or(DEFAULT_PREVIEW_LIMIT));
        self.client.call(request).await
    }

    /// The bank file, byte for byte
    pub async fn download_bank(&self, id: impl Display) -> Result<Vec<u8>> {
        let request = RequestDescriptor::get(format!("/banks/{}/download", segment(id)))
            .options(RequestOptions::blob());
        self.client.call_blob(request).await
    }

    /// Free-text search; `q` goes first, then the filters
    pub async fn search(&self, q: &str, filters: &MarketQuery) -> Result<Value> {
        let request = RequestDescriptor::get("/search")
            .query("q", q)
            .query_pairs(filters.to_query().into_iter().filter(|(key, _)| key != "q"));
        self.client.call(request).await
    }

    pub async fn get_categories(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/categories")).await
    }

    pub async fn get_subjects(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/subjects")).await
    }

    /// Publish a bank file; the service decides whether the caller may
    pub async fn upload_bank(&self, file: FilePart) -> Result<Value> {
        let request = RequestDescriptor::post("/banks")
            .multipart(file)
            .options(RequestOptions::file_upload(None));
        self.client.call(request).await
    }
}
