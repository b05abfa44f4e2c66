//! Application version, updates and native pickers

use serde_json::Value;

use crate::client::LocalClient;
use crate::error::Result;
use crate::models::SelectFileParams;
use crate::transport::RequestDescriptor;

#[derive(Debug, Clone)]
pub struct SystemApi {
    client: LocalClient,
}

impl SystemApi {
    pub fn new(client: LocalClient) -> Self {
        Self { client }
    }

    pub async fn get_version(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/system/version")).await
    }

    pub async fn check_update(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/system/check-update")).await
    }

    /// Open the server host's folder picker; resolves once the user chooses
    pub async fn select_folder(&self) -> Result<Value> {
        self.client.call(RequestDescriptor::get("/system/select-folder")).await
    }

    pub async fn select_file(&self, params: &SelectFileParams) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get("/system/select-file").query_pairs(params.to_query()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::local_harness;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_version_payload() {
        let harness = local_harness();
        harness
            .transport
            .respond_json(json!({"version": "1.3.0", "name": "智题坊"}));

        let version = SystemApi::new(harness.client.clone()).get_version().await.unwrap();
        assert_eq!(version["version"], "1.3.0");
    }

    #[tokio::test]
    async fn test_select_file_query() {
        let harness = local_harness();
        let params = SelectFileParams {
            filetypes: Some("JSON文件 (*.json)|*.json".to_string()),
            ..SelectFileParams::default()
        };

        SystemApi::new(harness.client.clone()).select_file(&params).await.unwrap();

        let request = harness.transport.single_request();
        assert_eq!(request.path, "/system/select-file");
        assert_eq!(
            request.query,
            vec![("filetypes".to_string(), "JSON文件 (*.json)|*.json".to_string())]
        );
    }
}
