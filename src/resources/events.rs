use crate::infrastructure::{Method, RequestExecutor};
use crate::types::constants::paths;
use crate::types::{ListOptions, Result};
use serde_json::Value;

/// Client for `/events`: the registry's activity feed (service joins,
/// timeouts, configuration changes).
pub struct EventsClient {
    executor: RequestExecutor,
}

impl EventsClient {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self, options: ListOptions) -> Result<Value> {
        self.executor
            .request(Method::GET, paths::EVENTS, &options.to_query(), None, None)
            .await?
            .into_resource()
    }
}
