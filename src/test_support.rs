//! Scripted transport and auth doubles shared by the in-file tests.

use crate::infrastructure::{
    AuthHeaders, AuthProvider, RequestExecutor, Transport, TransportRequest, TransportResponse,
};
use crate::types::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub(crate) fn json_response(status: u16, body: &str) -> TransportResponse {
    TransportResponse {
        status,
        headers: HashMap::new(),
        body: body.as_bytes().to_vec(),
    }
}

pub(crate) fn created_response(location: &str, body: &str) -> TransportResponse {
    let mut headers = HashMap::new();
    headers.insert("location".to_string(), location.to_string());
    TransportResponse {
        status: 201,
        headers,
        body: body.as_bytes().to_vec(),
    }
}

pub(crate) fn conflict_response() -> TransportResponse {
    json_response(
        400,
        r#"{"type":"serviceWithThisIdExists","code":400,"message":"Service with this id exists"}"#,
    )
}

/// Transport that replays scripted responses and records every request.
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<TransportResponse>>,
    repeat: Option<TransportResponse>,
    latency: Option<Duration>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub(crate) fn new(responses: Vec<TransportResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            repeat: None,
            latency: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Response to serve once the script runs out.
    pub(crate) fn with_repeat(mut self, response: TransportResponse) -> Self {
        self.repeat = Some(response);
        self
    }

    /// Simulated round-trip time (virtual time under a paused runtime).
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next.or_else(|| self.repeat.clone()) {
            Some(response) => Ok(response),
            None => panic!("MockTransport ran out of scripted responses"),
        }
    }
}

/// Auth provider whose token changes on every refresh, so tests can assert
/// that a retried request carried fresh credentials.
pub(crate) struct MockAuth {
    tenant_id: String,
    refreshes: AtomicU32,
}

impl MockAuth {
    pub(crate) fn new(tenant_id: &str) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            refreshes: AtomicU32::new(0),
        }
    }

    pub(crate) fn refresh_count(&self) -> u32 {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    async fn auth_headers(&self) -> Result<AuthHeaders> {
        Ok(AuthHeaders {
            token: format!("token-{}", self.refresh_count()),
            tenant_id: self.tenant_id.clone(),
        })
    }

    async fn refresh(&self) -> Result<AuthHeaders> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        self.auth_headers().await
    }
}

/// Executor over the given transport with a tenant-`7777` mock auth.
pub(crate) fn executor_with(transport: Arc<MockTransport>) -> RequestExecutor {
    RequestExecutor::new(
        transport,
        Arc::new(MockAuth::new("7777")),
        "http://127.0.0.1:8881/v1.0/",
    )
}

/// Executor with no scripted responses, for tests that never send.
pub(crate) fn executor() -> RequestExecutor {
    executor_with(Arc::new(MockTransport::new(Vec::new())))
}
