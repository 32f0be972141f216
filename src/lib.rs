//! # Service Registry Rust client
//!
//! An async Rust client for the Rackspace Service Registry API: create
//! authenticated sessions, keep them alive with periodic heartbeats, and
//! register services under them with automatic retry on id conflicts.
//!
//! ## Example
//!
//! ```no_run
//! use service_registry_rs::{RegistryClient, RegistryClientOptions, StaticAuthProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let auth = Arc::new(StaticAuthProvider::new("authToken", "tenantId"));
//!     let client = RegistryClient::new(auth, RegistryClientOptions::default())?;
//!
//!     // Create a session and start heartbeating its lease.
//!     let mut created = client.sessions().create(30, None).await?;
//!     created.heartbeater.start()?;
//!
//!     // Register a service under the session; id conflicts are retried.
//!     client
//!         .services()
//!         .register(&created.id, "dfw1-db1", None, None)
//!         .await?;
//!
//!     // ...
//!     created.heartbeater.stop();
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod heartbeat;
pub mod infrastructure;
pub mod registration;
pub mod resources;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::{RegistryClient, RegistryClientBuilder, RegistryClientOptions};
pub use heartbeat::HeartBeater;
pub use infrastructure::{
    AuthHeaders, AuthProvider, HttpTransport, Method, RequestExecutor, StaticAuthProvider,
    Transport, TransportRequest, TransportResponse,
};
pub use registration::{RetryDecision, RetryState};
pub use resources::{
    AccountClient, ConfigurationClient, EventsClient, ServicesClient, SessionCreation,
    SessionsClient,
};
pub use types::{Decoded, ErrorPayload, ListOptions, RegistryError, Result};
