use super::RegistryClient;
use crate::infrastructure::{
    AuthProvider, HttpTransport, RequestExecutor, Transport,
};
use crate::resources::{
    AccountClient, ConfigurationClient, EventsClient, ServicesClient, SessionsClient,
};
use crate::types::Result;
use crate::types::constants::DEFAULT_API_URL;
use std::sync::Arc;
use url::Url;

#[derive(Debug, Clone)]
pub struct RegistryClientOptions {
    /// Base Service Registry URL the tenant id and paths are appended to.
    pub base_url: String,
}

impl Default for RegistryClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Builder for [`RegistryClient`] that validates options and wires the
/// shared executor into the resource clients.
pub struct RegistryClientBuilder {
    auth: Arc<dyn AuthProvider>,
    options: RegistryClientOptions,
    transport: Option<Arc<dyn Transport>>,
}

impl RegistryClientBuilder {
    /// Create a new builder.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UrlParse`](crate::types::RegistryError::UrlParse)
    /// if the base URL cannot be parsed.
    pub fn new(auth: Arc<dyn AuthProvider>, options: RegistryClientOptions) -> Result<Self> {
        Url::parse(&options.base_url)?;

        Ok(Self {
            auth,
            options,
            transport: None,
        })
    }

    /// Replace the default reqwest transport (tests inject a scripted one).
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client. All resource clients share one executor and, with
    /// it, one pooled transport.
    pub fn build(self) -> RegistryClient {
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(HttpTransport::new()));
        let executor = RequestExecutor::new(transport, self.auth, self.options.base_url);

        RegistryClient {
            sessions: SessionsClient::new(executor.clone()),
            services: ServicesClient::new(executor.clone()),
            events: EventsClient::new(executor.clone()),
            configuration: ConfigurationClient::new(executor.clone()),
            account: AccountClient::new(executor),
        }
    }
}
