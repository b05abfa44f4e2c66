//! Shared test support utilities for integration tests
//!
//! Tests mount their answers on a [`MockServer`] and inspect what went over
//! the wire with [`single_request`].

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use qbank_core::{ApiClients, ClientConfig, Notifier};
use tokio::net::TcpListener;
use wiremock::{MockServer, Request};

/// Configuration pointing both clients at `server`
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        local_base_url: format!("{}/api", server.uri()),
        market_base_url: format!("{}/api/market", server.uri()),
        ..ClientConfig::default()
    }
}

/// The only request `server` has received
pub async fn single_request(server: &MockServer) -> Request {
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.into_iter().next().unwrap()
}

/// Path and query exactly as sent
pub fn target(request: &Request) -> String {
    match request.url.query() {
        Some(query) => format!("{}?{}", request.url.path(), query),
        None => request.url.path().to_string(),
    }
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
}

/// Notifier that records every message it is handed
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

/// Clients for `config`, reporting into a fresh recording notifier
pub fn clients(config: &ClientConfig) -> (ApiClients, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let clients = ApiClients::from_config(config, notifier.clone()).unwrap();
    (clients, notifier)
}

/// An address nothing is listening on
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
