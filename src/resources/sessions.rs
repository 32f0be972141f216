use crate::heartbeat::HeartBeater;
use crate::infrastructure::{Method, RequestExecutor};
use crate::types::constants::paths;
use crate::types::{Decoded, ListOptions, RegistryError, Result};
use serde_json::{Map, Value};

/// Result of creating a session: the parsed response body (when the server
/// sent one), the session id learned from the `Location` header, and a
/// HeartBeater already bound to the session and seeded with the first
/// token. Call [`HeartBeater::start`] to begin renewing the lease.
#[derive(Debug)]
pub struct SessionCreation {
    pub body: Option<Value>,
    pub id: String,
    pub heartbeater: HeartBeater,
}

/// Client for `/sessions`: leased identities kept alive via heartbeats.
pub struct SessionsClient {
    executor: RequestExecutor,
}

impl SessionsClient {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Create a session with the given heartbeat timeout (seconds, must be
    /// positive) and optional metadata.
    pub async fn create(
        &self,
        heartbeat_timeout: u64,
        metadata: Option<Map<String, Value>>,
    ) -> Result<SessionCreation> {
        if heartbeat_timeout == 0 {
            return Err(RegistryError::InvalidTimeout(heartbeat_timeout));
        }

        let mut body = Map::new();
        body.insert("heartbeat_timeout".to_string(), heartbeat_timeout.into());
        if let Some(metadata) = metadata {
            body.insert("metadata".to_string(), Value::Object(metadata));
        }
        let payload = Value::Object(body);

        let mut heartbeater = HeartBeater::new(self.executor.clone(), None, heartbeat_timeout);
        let decoded = self
            .executor
            .request(
                Method::POST,
                paths::SESSIONS,
                &[],
                Some(&payload),
                Some(&mut heartbeater),
            )
            .await?;

        match decoded {
            Decoded::Created { id, body } => Ok(SessionCreation {
                body,
                id,
                heartbeater,
            }),
            other => Err(RegistryError::InvalidResponse(format!(
                "unexpected response to session create: {other:?}"
            ))),
        }
    }

    /// Renew a session lease once. The returned body carries the token the
    /// next heartbeat must send. [`HeartBeater`] calls this endpoint on a
    /// schedule; use this directly only when driving renewal yourself.
    pub async fn heartbeat(&self, session_id: &str, token: &str) -> Result<Value> {
        let path = format!("{}/{}/heartbeat", paths::SESSIONS, session_id);
        let payload = serde_json::json!({ "token": token });
        self.executor
            .request(Method::POST, &path, &[], Some(&payload), None)
            .await?
            .into_resource()
    }

    pub async fn get(&self, session_id: &str) -> Result<Value> {
        let path = format!("{}/{}", paths::SESSIONS, session_id);
        self.executor
            .request(Method::GET, &path, &[], None, None)
            .await?
            .into_resource()
    }

    pub async fn list(&self, options: ListOptions) -> Result<Value> {
        self.executor
            .request(Method::GET, paths::SESSIONS, &options.to_query(), None, None)
            .await?
            .into_resource()
    }

    /// Update a session's heartbeat timeout and/or metadata.
    pub async fn update(&self, session_id: &str, payload: Map<String, Value>) -> Result<()> {
        let path = format!("{}/{}", paths::SESSIONS, session_id);
        self.executor
            .request(
                Method::PUT,
                &path,
                &[],
                Some(&Value::Object(payload)),
                None,
            )
            .await?
            .into_ack()
    }
}
