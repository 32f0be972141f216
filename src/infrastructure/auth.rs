use crate::types::Result;
use async_trait::async_trait;

/// Headers attached to every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// Opaque auth token
    pub token: String,
    /// Tenant id, inserted into the request path
    pub tenant_id: String,
}

/// Source of authentication headers. Implementations may cache tokens and
/// talk to an identity service; the executor only requires that
/// [`refresh`](AuthProvider::refresh) yields credentials worth retrying
/// with after a 401.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current authentication headers.
    async fn auth_headers(&self) -> Result<AuthHeaders>;

    /// Re-acquire headers after an unauthorized response. Defaults to
    /// fetching the current headers again.
    async fn refresh(&self) -> Result<AuthHeaders> {
        self.auth_headers().await
    }
}

/// [`AuthProvider`] with fixed credentials, for deployments where token
/// acquisition happens out of band.
pub struct StaticAuthProvider {
    headers: AuthHeaders,
}

impl StaticAuthProvider {
    pub fn new(token: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            headers: AuthHeaders {
                token: token.into(),
                tenant_id: tenant_id.into(),
            },
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn auth_headers(&self) -> Result<AuthHeaders> {
        Ok(self.headers.clone())
    }
}
