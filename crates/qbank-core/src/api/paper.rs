//! Papers generated from question banks

use std::fmt::Display;

use serde_json::Value;

use crate::api::segment;
use crate::client::LocalClient;
use crate::error::Result;
use crate::models::PaperGenerateRequest;
use crate::transport::RequestDescriptor;

#[derive(Debug, Clone)]
pub struct PaperApi {
    client: LocalClient,
}

impl PaperApi {
    pub fn new(client: LocalClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/papers")).await
    }

    pub async fn get(&self, id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get(format!("/papers/{}", segment(id))))
            .await
    }

    pub async fn get_questions(&self, id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get(format!("/papers/{}/questions", segment(id))))
            .await
    }

    pub async fn generate(&self, request: &PaperGenerateRequest) -> Result<Value> {
        self.client
            .call(RequestDescriptor::post("/papers/generate").json(request)?)
            .await
    }

    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::delete(format!("/papers/{}", segment(id))))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::local_harness;
    use crate::transport::RequestBody;
    use reqwest::Method;

    #[tokio::test]
    async fn test_generate_posts_config() {
        let harness = local_harness();
        let request = PaperGenerateRequest {
            title: "期中测验".to_string(),
            bank_ids: vec!["b1".to_string(), "b2".to_string()],
            ..PaperGenerateRequest::default()
        };

        PaperApi::new(harness.client.clone()).generate(&request).await.unwrap();

        let sent = harness.transport.single_request();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.path, "/papers/generate");
        match sent.body {
            RequestBody::Json(body) => {
                assert_eq!(body["title"], "期中测验");
                assert_eq!(body["bank_ids"][1], "b2");
                assert_eq!(body["single_count"], 10);
            }
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_questions_path() {
        let harness = local_harness();
        PaperApi::new(harness.client.clone()).get_questions("p-1").await.unwrap();
        assert_eq!(harness.transport.single_request().path, "/papers/p-1/questions");
    }
}
