use super::{RegistryClientBuilder, RegistryClientOptions};
use crate::infrastructure::AuthProvider;
use crate::resources::{
    AccountClient, ConfigurationClient, EventsClient, ServicesClient, SessionsClient,
};
use crate::types::Result;
use std::sync::Arc;

/// The main entry point for interacting with the Service Registry.
///
/// A `RegistryClient` bundles the five resource clients over one shared,
/// authenticated executor. Every request passes through the executor's
/// one-shot re-auth-and-retry on 401, so token refresh is transparent to
/// callers.
///
/// # Example
///
/// ```no_run
/// use service_registry_rs::{RegistryClient, RegistryClientOptions, StaticAuthProvider};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = Arc::new(StaticAuthProvider::new("authToken", "tenantId"));
/// let client = RegistryClient::new(auth, RegistryClientOptions::default())?;
///
/// let mut created = client.sessions().create(30, None).await?;
/// created.heartbeater.start()?;
///
/// let service_id = client
///     .services()
///     .register(&created.id, "dfw1-db1", None, None)
///     .await?;
/// println!("registered {service_id}");
/// # Ok(())
/// # }
/// ```
pub struct RegistryClient {
    pub(crate) sessions: SessionsClient,
    pub(crate) services: ServicesClient,
    pub(crate) events: EventsClient,
    pub(crate) configuration: ConfigurationClient,
    pub(crate) account: AccountClient,
}

impl RegistryClient {
    /// Create a client with the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UrlParse`](crate::types::RegistryError::UrlParse)
    /// if the configured base URL is malformed.
    pub fn new(auth: Arc<dyn AuthProvider>, options: RegistryClientOptions) -> Result<Self> {
        RegistryClientBuilder::new(auth, options).map(|builder| builder.build())
    }

    pub fn sessions(&self) -> &SessionsClient {
        &self.sessions
    }

    pub fn services(&self) -> &ServicesClient {
        &self.services
    }

    pub fn events(&self) -> &EventsClient {
        &self.events
    }

    pub fn configuration(&self) -> &ConfigurationClient {
        &self.configuration
    }

    pub fn account(&self) -> &AccountClient {
        &self.account
    }
}
