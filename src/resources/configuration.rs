use crate::infrastructure::{Method, RequestExecutor};
use crate::types::constants::paths;
use crate::types::{ListOptions, Result};
use serde_json::Value;

/// Client for `/configuration`: shared key/value settings.
pub struct ConfigurationClient {
    executor: RequestExecutor,
}

impl ConfigurationClient {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self, options: ListOptions) -> Result<Value> {
        self.executor
            .request(
                Method::GET,
                paths::CONFIGURATION,
                &options.to_query(),
                None,
                None,
            )
            .await?
            .into_resource()
    }

    pub async fn get(&self, configuration_id: &str) -> Result<Value> {
        let path = format!("{}/{}", paths::CONFIGURATION, configuration_id);
        self.executor
            .request(Method::GET, &path, &[], None, None)
            .await?
            .into_resource()
    }

    pub async fn set(&self, configuration_id: &str, value: impl Into<Value>) -> Result<()> {
        let path = format!("{}/{}", paths::CONFIGURATION, configuration_id);
        let payload = serde_json::json!({ "value": value.into() });
        self.executor
            .request(Method::PUT, &path, &[], Some(&payload), None)
            .await?
            .into_ack()
    }

    pub async fn remove(&self, configuration_id: &str) -> Result<()> {
        let path = format!("{}/{}", paths::CONFIGURATION, configuration_id);
        self.executor
            .request(Method::DELETE, &path, &[], None, None)
            .await?
            .into_ack()
    }
}
