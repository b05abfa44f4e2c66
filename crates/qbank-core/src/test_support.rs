//! Test doubles shared by unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::{LocalClient, MarketClient};
use crate::normalizer::{Notifier, ResponseNormalizer};
use crate::transport::{RawResponse, RequestDescriptor, Transport, TransportError};

/// Records every request and replays queued outcomes.
///
/// With nothing queued it answers `200 {}`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RequestDescriptor>>,
    outcomes: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn respond_with(&self, outcome: Result<RawResponse, TransportError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn respond_json(&self, value: Value) {
        self.respond_with(Ok(RawResponse::from_json(200, &value)));
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request sent so far
    pub fn single_request(&self) -> RequestDescriptor {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::from_json(200, &json!({}))))
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub struct LocalHarness {
    pub client: LocalClient,
    pub transport: Arc<RecordingTransport>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn local_harness() -> LocalHarness {
    let transport = Arc::new(RecordingTransport::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let client = LocalClient::new(transport.clone(), ResponseNormalizer::new(notifier.clone()));
    LocalHarness {
        client,
        transport,
        notifier,
    }
}

pub fn market_harness() -> (MarketClient, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    (MarketClient::new(transport.clone()), transport)
}
