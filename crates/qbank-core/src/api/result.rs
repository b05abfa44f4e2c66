//! Exam results

use std::fmt::Display;

use serde_json::Value;

use crate::api::segment;
use crate::client::LocalClient;
use crate::error::Result;
use crate::transport::RequestDescriptor;

#[derive(Debug, Clone)]
pub struct ResultApi {
    client: LocalClient,
}

impl ResultApi {
    pub fn new(client: LocalClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/results")).await
    }

    pub async fn get(&self, id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get(format!("/results/{}", segment(id))))
            .await
    }

    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        self.client
            .call(RequestDescriptor::delete(format!("/results/{}", segment(id))))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::local_harness;
    use reqwest::Method;

    #[tokio::test]
    async fn test_delete_result() {
        let harness = local_harness();
        ResultApi::new(harness.client.clone()).delete("r7").await.unwrap();

        let request = harness.transport.single_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "/results/r7");
    }
}
