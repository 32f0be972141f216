// Infrastructure module - transport, authentication and the shared executor
pub mod auth;
pub mod executor;
pub mod transport;

pub use auth::{AuthHeaders, AuthProvider, StaticAuthProvider};
pub use executor::RequestExecutor;
pub use transport::{HttpTransport, Method, Transport, TransportRequest, TransportResponse};
