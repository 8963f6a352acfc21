//! Shared helpers for the integration tests.
#![allow(dead_code, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use vouch::{Header, HttpClient, HttpClientError, ResponseSpec, TransportRequest};

/// Mock HTTP client that replays queued responses and records every request.
///
/// Once the queue is down to its last response, that response is repeated.
pub struct MockHttpClient {
    responses: Mutex<VecDeque<ResponseSpec>>,
    sent: Mutex<Vec<TransportRequest>>,
}

impl MockHttpClient {
    pub fn new(responses: Vec<ResponseSpec>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn responding(status: u16, headers: &[(&str, &str)], body: &str) -> Arc<Self> {
        Self::new(vec![response(status, headers, body)])
    }

    pub fn sent(&self) -> Vec<TransportRequest> {
        self.sent.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: TransportRequest) -> Result<ResponseSpec, HttpClientError> {
        self.sent.lock().push(request);
        let mut responses = self.responses.lock();
        let response = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        };
        response.ok_or_else(|| HttpClientError::Other("no response queued".to_string()))
    }
}

pub fn response(status: u16, headers: &[(&str, &str)], body: &str) -> ResponseSpec {
    let headers = headers
        .iter()
        .map(|(name, value)| Header::new(*name, *value))
        .collect();
    ResponseSpec::new(status, headers, body, Duration::from_millis(1))
}

/// `MockHttpClient` as the trait object the facade takes.
pub fn client(mock: &Arc<MockHttpClient>) -> Arc<dyn HttpClient> {
    Arc::clone(mock) as Arc<dyn HttpClient>
}
