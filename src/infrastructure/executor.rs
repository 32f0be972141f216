use crate::heartbeat::HeartBeater;
use crate::infrastructure::{AuthProvider, Method, Transport, TransportRequest};
use crate::types::constants::{AUTH_TOKEN_HEADER, MAX_AUTH_RETRIES};
use crate::types::decode::decode;
use crate::types::{Decoded, ErrorPayload, RegistryError, Result};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Shared request helper every resource client holds by composition.
///
/// This is the single choke point for registry requests: it fetches auth
/// headers, builds the tenant-scoped URL, sends the request through the
/// transport, and transparently re-authenticates and re-issues the whole
/// request once on a 401. Non-2xx responses surface as
/// [`RegistryError::Api`] carrying the parsed error payload.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    auth: Arc<dyn AuthProvider>,
    base_url: String,
}

impl RequestExecutor {
    pub fn new(
        transport: Arc<dyn Transport>,
        auth: Arc<dyn AuthProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            transport,
            auth,
            base_url,
        }
    }

    /// Perform an authenticated request against the registry.
    ///
    /// `query` pairs are appended verbatim; `payload` is serialized as the
    /// JSON body; `heartbeater`, when present, is seeded by the decoder
    /// from the response (session id and initial token).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: Option<&Value>,
        mut heartbeater: Option<&mut HeartBeater>,
    ) -> Result<Decoded> {
        let body = payload.map(serde_json::to_vec).transpose()?;
        let mut headers = self.auth.auth_headers().await?;
        let mut auth_retries = 0u32;

        loop {
            let url = self.build_url(&headers.tenant_id, path, query)?;
            tracing::debug!(%method, %url, "sending registry request");

            let request = TransportRequest {
                method: method.clone(),
                url,
                headers: vec![(AUTH_TOKEN_HEADER.to_string(), headers.token.clone())],
                body: body.clone(),
            };
            let response = self.transport.send(request).await?;

            if response.status == 401 {
                if auth_retries < MAX_AUTH_RETRIES {
                    auth_retries += 1;
                    tracing::debug!(path, "unauthorized, refreshing auth headers and retrying");
                    headers = self.auth.refresh().await?;
                    continue;
                }
                return Err(RegistryError::Auth(format!(
                    "request to {path} still unauthorized after {MAX_AUTH_RETRIES} retry"
                )));
            }

            if !(200..300).contains(&response.status) {
                let payload: ErrorPayload = serde_json::from_slice(&response.body)?;
                return Err(RegistryError::Api(payload));
            }

            return decode(&response, heartbeater.take());
        }
    }

    fn build_url(&self, tenant_id: &str, path: &str, query: &[(&str, String)]) -> Result<String> {
        let mut url = Url::parse(&format!("{}{}{}", self.base_url, tenant_id, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url.into())
    }
}
