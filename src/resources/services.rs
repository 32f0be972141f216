use crate::infrastructure::{Method, RequestExecutor};
use crate::registration::{RetryDecision, RetryState};
use crate::types::constants::{DEFAULT_REGISTRATION_RETRY_DELAY, SERVICE_CONFLICT_TYPE, paths};
use crate::types::{ListOptions, RegistryError, Result};
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::time;

/// Client for `/services`: entities registered under a session, identified
/// by a caller-chosen unique id.
pub struct ServicesClient {
    executor: RequestExecutor,
}

impl ServicesClient {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Create a service owned by `session_id`. Fails with
    /// [`RegistryError::Api`] when the id is already taken; the id is not
    /// consumed and [`register`](Self::register) may retry it.
    pub async fn create(
        &self,
        session_id: &str,
        service_id: &str,
        payload: Option<Map<String, Value>>,
    ) -> Result<String> {
        let mut body = payload.unwrap_or_default();
        body.insert("id".to_string(), service_id.into());
        body.insert("session_id".to_string(), session_id.into());

        self.executor
            .request(
                Method::POST,
                paths::SERVICES,
                &[],
                Some(&Value::Object(body)),
                None,
            )
            .await?
            .into_created_id()
    }

    /// Create a service, retrying id conflicts until the retry budget is
    /// spent. A conflict means another actor claimed the id a moment
    /// earlier; any other error is terminal on first occurrence. The
    /// budget (30s) divided by `retry_delay` (2s when `None`) caps the
    /// attempt count.
    pub async fn register(
        &self,
        session_id: &str,
        service_id: &str,
        payload: Option<Map<String, Value>>,
        retry_delay: Option<Duration>,
    ) -> Result<String> {
        let delay = retry_delay.unwrap_or(DEFAULT_REGISTRATION_RETRY_DELAY);
        let mut state = RetryState::new(delay);

        loop {
            match self.create(session_id, service_id, payload.clone()).await {
                Ok(id) => return Ok(id),
                Err(RegistryError::Api(error)) if error.kind == SERVICE_CONFLICT_TYPE => {
                    match state.record_conflict(error) {
                        RetryDecision::RetryAfter(delay) => {
                            tracing::debug!(
                                service = service_id,
                                attempt = state.attempts(),
                                "service id taken, retrying registration"
                            );
                            time::sleep(delay).await;
                        }
                        RetryDecision::GiveUp(last) => {
                            return Err(RegistryError::RetriesExhausted(last));
                        }
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn get(&self, service_id: &str) -> Result<Value> {
        let path = format!("{}/{}", paths::SERVICES, service_id);
        self.executor
            .request(Method::GET, &path, &[], None, None)
            .await?
            .into_resource()
    }

    pub async fn list(&self, options: ListOptions) -> Result<Value> {
        self.executor
            .request(Method::GET, paths::SERVICES, &options.to_query(), None, None)
            .await?
            .into_resource()
    }

    /// List services carrying the given tag.
    pub async fn list_for_tag(&self, tag: &str, options: ListOptions) -> Result<Value> {
        let mut query = options.to_query();
        query.push(("tag", tag.to_string()));
        self.executor
            .request(Method::GET, paths::SERVICES, &query, None, None)
            .await?
            .into_resource()
    }

    pub async fn update(&self, service_id: &str, payload: Map<String, Value>) -> Result<()> {
        let path = format!("{}/{}", paths::SERVICES, service_id);
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

    pub async fn remove(&self, service_id: &str) -> Result<()> {
        let path = format!("{}/{}", paths::SERVICES, service_id);
        self.executor
            .request(Method::DELETE, &path, &[], None, None)
            .await?
            .into_ack()
    }
}
