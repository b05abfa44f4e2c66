//! Server-side settings: AI provider and storage paths

use serde_json::Value;

use crate::client::LocalClient;
use crate::error::Result;
use crate::models::{AiConfigUpdate, PathConfigUpdate};
use crate::transport::RequestDescriptor;

#[derive(Debug, Clone)]
pub struct ConfigApi {
    client: LocalClient,
}

impl ConfigApi {
    pub fn new(client: LocalClient) -> Self {
        Self { client }
    }

    pub async fn get_ai(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/config/ai")).await
    }

    pub async fn update_ai(&self, changes: &AiConfigUpdate) -> Result<Value> {
        self.client
            .call(RequestDescriptor::put("/config/ai").json(changes)?)
            .await
    }

    pub async fn get_paths(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/config/paths")).await
    }

    pub async fn update_paths(&self, changes: &PathConfigUpdate) -> Result<Value> {
        self.client
            .call(RequestDescriptor::put("/config/paths").json(changes)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::local_harness;
    use crate::transport::RequestBody;
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_ai_sends_only_changes() {
        let harness = local_harness();
        let changes = AiConfigUpdate {
            model: Some("deepseek-chat".to_string()),
            temperature: Some(0.3),
            ..AiConfigUpdate::default()
        };

        ConfigApi::new(harness.client.clone()).update_ai(&changes).await.unwrap();

        let request = harness.transport.single_request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/config/ai");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"model": "deepseek-chat", "temperature": 0.3}))
        );
    }
}
