use crate::types::payload::ErrorPayload;
use thiserror::Error;

/// Errors that can occur when using the Service Registry client.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Request still unauthorized after the auth retry ceiling
    #[error("authentication error: {0}")]
    Auth(String),

    /// Malformed response body; surfaced immediately, never retried
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// HTTP transport failure (connection error, timeout, etc.)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error (malformed base URL or path)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Non-retryable error payload reported by the registry
    #[error("registry error: {0}")]
    Api(ErrorPayload),

    /// Registration retry budget spent; carries the last conflict payload
    #[error("registration retries exhausted: {0}")]
    RetriesExhausted(ErrorPayload),

    /// Response did not have the shape the operation requires
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Heartbeat timeouts must be positive
    #[error("heartbeat timeout must be positive, got {0}")]
    InvalidTimeout(u64),

    /// HeartBeater misuse (started without a session, restarted after stop)
    #[error("heartbeat error: {0}")]
    Heartbeat(String),
}

/// Convenience type alias for `Result<T, RegistryError>`.
pub type Result<T> = std::result::Result<T, RegistryError>;
