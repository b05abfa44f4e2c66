//! Bulk export and import of application data

use serde_json::Value;

use crate::client::LocalClient;
use crate::error::Result;
use crate::models::{ExportRequest, ImportRequest};
use crate::transport::RequestDescriptor;

#[derive(Debug, Clone)]
pub struct DataApi {
    client: LocalClient,
}

impl DataApi {
    pub fn new(client: LocalClient) -> Self {
        Self { client }
    }

    pub async fn export(&self, request: &ExportRequest) -> Result<Value> {
        self.client
            .call(RequestDescriptor::post("/data/export").json(request)?)
            .await
    }

    /// List what an export directory contains before importing it
    pub async fn scan_import(&self, path: &str) -> Result<Value> {
        self.client
            .call(RequestDescriptor::get("/data/scan-import").query("path", path))
            .await
    }

    pub async fn import(&self, request: &ImportRequest) -> Result<Value> {
        self.client
            .call(RequestDescriptor::post("/data/import").json(request)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::local_harness;
    use crate::transport::RequestBody;

    #[tokio::test]
    async fn test_scan_import_uses_query() {
        let harness = local_harness();
        DataApi::new(harness.client.clone())
            .scan_import("D:/智题坊备份/2024")
            .await
            .unwrap();

        let request = harness.transport.single_request();
        assert_eq!(request.path, "/data/scan-import");
        assert_eq!(
            request.query,
            vec![("path".to_string(), "D:/智题坊备份/2024".to_string())]
        );
        assert_eq!(request.body, RequestBody::Empty);
    }

    #[tokio::test]
    async fn test_import_body() {
        let harness = local_harness();
        let mut request = ImportRequest::new("D:/backup");
        request.selection.include_results = false;

        DataApi::new(harness.client.clone()).import(&request).await.unwrap();

        match harness.transport.single_request().body {
            RequestBody::Json(body) => {
                assert_eq!(body["import_path"], "D:/backup");
                assert_eq!(body["include_results"], false);
            }
            other => panic!("expected JSON body, got {other:?}"),
        }
    }
}
