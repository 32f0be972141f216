use crate::infrastructure::{Method, RequestExecutor};
use crate::types::constants::paths;
use crate::types::Result;
use serde_json::Value;

/// Client for account-level endpoints.
pub struct AccountClient {
    executor: RequestExecutor,
}

impl AccountClient {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Rate and resource limits for the authenticated account.
    pub async fn limits(&self) -> Result<Value> {
        self.executor
            .request(Method::GET, paths::LIMITS, &[], None, None)
            .await?
            .into_resource()
    }
}
