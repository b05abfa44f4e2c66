//! The two clients and the composition root that builds them
//!
//! [`LocalClient`] routes every outcome through the [`ResponseNormalizer`];
//! [`MarketClient`] does not, and leaves failure handling to its callers.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::{
    AiApi, BankApi, ConfigApi, DataApi, ExamApi, FavoriteApi, MarketApi, PaperApi, ResultApi,
    SystemApi,
};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::normalizer::{Notifier, ResponseNormalizer};
use crate::transport::{HttpTransport, RequestDescriptor, ResponseType, Transport};

/// Client for the local application server
#[derive(Debug, Clone)]
pub struct LocalClient {
    transport: Arc<dyn Transport>,
    normalizer: ResponseNormalizer,
}

impl LocalClient {
    pub fn new(transport: Arc<dyn Transport>, normalizer: ResponseNormalizer) -> Self {
        Self {
            transport,
            normalizer,
        }
    }

    pub fn normalizer(&self) -> &ResponseNormalizer {
        &self.normalizer
    }

    /// Perform one call and normalize its outcome.
    ///
    /// Only JSON responses are supported here.
    pub async fn call(&self, request: RequestDescriptor) -> Result<Value> {
        if request.options.response_type != ResponseType::Json {
            return Err(Error::wrong_response_type(&request.path, "JSON"));
        }
        let outcome = self.transport.send(request).await;
        self.normalizer.normalize(outcome)
    }

    /// Like [`call`](Self::call), decoding the payload into `T`
    pub async fn call_as<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        let path = request.path.clone();
        let payload = self.call(request).await?;
        serde_json::from_value(payload).map_err(|e| Error::Json {
            message: format!("Unexpected payload from {}", path),
            source: e,
        })
    }
}

/// Client for the remote marketplace
#[derive(Debug, Clone)]
pub struct MarketClient {
    transport: Arc<dyn Transport>,
}

impl MarketClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Perform one call and return the response body as JSON.
    ///
    /// Descriptors asking for a blob are refused; use [`call_blob`](Self::call_blob).
    pub async fn call(&self, request: RequestDescriptor) -> Result<Value> {
        if request.options.response_type != ResponseType::Json {
            return Err(Error::wrong_response_type(&request.path, "JSON"));
        }
        Ok(self.transport.send(request).await?.json_payload())
    }

    /// Perform one call and return the response body untouched
    pub async fn call_blob(&self, mut request: RequestDescriptor) -> Result<Vec<u8>> {
        request.options.response_type = ResponseType::Blob;
        Ok(self.transport.send(request).await?.into_bytes())
    }
}

/// Both clients, constructed once and handed to the facades
#[derive(Debug, Clone)]
pub struct ApiClients {
    local: LocalClient,
    market: MarketClient,
    config: ClientConfig,
}

impl ApiClients {
    pub fn new(local: LocalClient, market: MarketClient, config: ClientConfig) -> Self {
        Self {
            local,
            market,
            config,
        }
    }

    /// Build HTTP-backed clients from configuration
    pub fn from_config(config: &ClientConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        config.validate()?;

        if config.market_is_placeholder() {
            warn!(
                market_base_url = %config.market_base_url,
                "Marketplace address is not configured; market calls will fail"
            );
        }

        let local_transport = HttpTransport::new(&config.local_base_url, config.default_timeout())?;
        let market_transport =
            HttpTransport::new(&config.market_base_url, config.default_timeout())?;

        info!(
            local_base_url = %config.local_base_url,
            market_base_url = %config.market_base_url,
            default_timeout_ms = config.default_timeout_ms,
            "API clients initialized"
        );

        Ok(Self::new(
            LocalClient::new(Arc::new(local_transport), ResponseNormalizer::new(notifier)),
            MarketClient::new(Arc::new(market_transport)),
            config.clone(),
        ))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn local(&self) -> &LocalClient {
        &self.local
    }

    pub fn market_client(&self) -> &MarketClient {
        &self.market
    }

    pub fn banks(&self) -> BankApi {
        BankApi::new(self.local.clone())
    }

    pub fn papers(&self) -> PaperApi {
        PaperApi::new(self.local.clone())
    }

    pub fn exams(&self) -> ExamApi {
        ExamApi::new(self.local.clone())
    }

    pub fn results(&self) -> ResultApi {
        ResultApi::new(self.local.clone())
    }

    pub fn ai(&self) -> AiApi {
        AiApi::new(self.local.clone(), self.config.file_parse_timeout())
    }

    pub fn settings(&self) -> ConfigApi {
        ConfigApi::new(self.local.clone())
    }

    pub fn data(&self) -> DataApi {
        DataApi::new(self.local.clone())
    }

    pub fn favorites(&self) -> FavoriteApi {
        FavoriteApi::new(self.local.clone())
    }

    pub fn system(&self) -> SystemApi {
        SystemApi::new(self.local.clone())
    }

    pub fn market(&self) -> MarketApi {
        MarketApi::new(self.market.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::TracingNotifier;
    use crate::test_support::{local_harness, market_harness};
    use crate::transport::{RawResponse, RequestOptions, TransportError};
    use serde::Deserialize;
    use serde_json::json;

    #[tokio::test]
    async fn test_local_call_unwraps_payload() {
        let harness = local_harness();
        harness.transport.respond_json(json!({"favorited": true}));

        let payload = harness
            .client
            .call(RequestDescriptor::get("/favorites/check/3"))
            .await
            .unwrap();

        assert_eq!(payload, json!({"favorited": true}));
    }

    #[tokio::test]
    async fn test_call_as_decodes_payload() {
        #[derive(Deserialize)]
        struct Version {
            version: String,
        }

        let harness = local_harness();
        harness
            .transport
            .respond_json(json!({"version": "1.3.0", "name": "智题坊"}));

        let version: Version = harness
            .client
            .call_as(RequestDescriptor::get("/system/version"))
            .await
            .unwrap();
        assert_eq!(version.version, "1.3.0");
    }

    #[tokio::test]
    async fn test_market_failures_are_raw() {
        let (client, transport) = market_harness();
        let failure = TransportError::Status {
            path: "/favorites".to_string(),
            status: 500,
            body: br#"{"detail":"boom"}"#.to_vec(),
        };
        transport.respond_with(Err(failure.clone()));

        let err = client.call(RequestDescriptor::get("/favorites")).await.unwrap_err();

        match err {
            Error::Transport(raw) => assert_eq!(raw, failure),
            other => panic!("expected raw transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_call_refuses_blob_descriptors() {
        let (client, transport) = market_harness();
        transport.respond_json(json!({"a": 1}));

        let request = RequestDescriptor::get("/banks/m1/download").options(RequestOptions::blob());
        let err = client.call(request).await.unwrap_err();

        assert!(matches!(err, Error::InvalidRequest { ref path, .. } if path == "/banks/m1/download"));
        assert!(transport.requests().is_empty());

        let harness = local_harness();
        let request = RequestDescriptor::get("/data/export").options(RequestOptions::blob());
        let err = harness.client.call(request).await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }));
        assert!(harness.transport.requests().is_empty());
        assert!(harness.notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_call_blob_forces_blob_response_type() {
        let (client, transport) = market_harness();
        transport.respond_with(Ok(RawResponse::new(200, br#"{"a":1}"#.to_vec())));

        let bytes = client
            .call_blob(RequestDescriptor::get("/banks/m1/download"))
            .await
            .unwrap();

        assert_eq!(bytes, br#"{"a":1}"#.to_vec());
        assert_eq!(transport.single_request().options.response_type, ResponseType::Blob);
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let config = ClientConfig {
            local_base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        let result = ApiClients::from_config(&config, Arc::new(TracingNotifier));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_from_config_with_placeholder_market() {
        let clients = ApiClients::from_config(&ClientConfig::default(), Arc::new(TracingNotifier))
            .unwrap();
        assert!(clients.config().market_is_placeholder());
        assert_eq!(clients.config().file_parse_timeout_ms, 120_000);
    }
}
