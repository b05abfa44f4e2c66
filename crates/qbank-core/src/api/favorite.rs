//! Favorited questions
//!
//! Failures on these paths are kept off the notification surface by the
//! default suppression policy; callers still receive the error.

use std::fmt::Display;

use serde_json::{json, Value};

use crate::api::segment;
use crate::client::LocalClient;
use crate::error::Result;
use crate::transport::RequestDescriptor;

#[derive(Debug, Clone)]
pub struct FavoriteApi {
    client: LocalClient,
}

impl FavoriteApi {
    pub fn new(client: LocalClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/favorites")).await
    }

    pub async fn get_statistics(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/favorites/statistics")).await
    }

    /// Banks that have at least one favorited question
    pub async fn get_banks(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/favorites/banks")).await
    }

    pub async fn add(&self, bank_id: impl Display, question_id: impl Display) -> Result<Value> {
        let path = format!("/favorites/{}/{}", segment(bank_id), segment(question_id));
        self.client.call(RequestDescriptor::post(path)).await
    }

    pub async fn remove(&self, question_id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::delete(format!("/favorites/{}", segment(question_id))))
            .await
    }

    pub async fn check(&self, question_id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get(format!(
                "/favorites/check/{}",
                segment(question_id)
            )))
            .await
    }

    pub async fn update_note(&self, question_id: impl Display, note: &str) -> Result<Value> {
        let request = RequestDescriptor::put(format!("/favorites/{}/note", segment(question_id)))
            .json(&json!({ "note": note }))?;
        self.client.call(request).await
    }

    pub async fn clear_all(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::delete("/favorites")).await
    }
}
