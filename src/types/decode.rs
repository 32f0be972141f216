use crate::heartbeat::HeartBeater;
use crate::infrastructure::TransportResponse;
use crate::types::{RegistryError, Result};
use serde_json::Value;

/// Domain result of a completed registry response.
#[derive(Debug)]
pub enum Decoded {
    /// 204: acknowledgment with no body
    Acknowledged,
    /// 201: resource created; id extracted from the `Location` header,
    /// body parsed when the server sent one
    Created { id: String, body: Option<Value> },
    /// Any other 2xx: the parsed JSON resource representation
    Resource(Value),
}

impl Decoded {
    pub fn into_resource(self) -> Result<Value> {
        match self {
            Decoded::Resource(body) => Ok(body),
            other => Err(RegistryError::InvalidResponse(format!(
                "expected a resource body, got {other:?}"
            ))),
        }
    }

    pub fn into_created_id(self) -> Result<String> {
        match self {
            Decoded::Created { id, .. } => Ok(id),
            other => Err(RegistryError::InvalidResponse(format!(
                "expected a created resource, got {other:?}"
            ))),
        }
    }

    pub fn into_ack(self) -> Result<()> {
        match self {
            Decoded::Acknowledged => Ok(()),
            other => Err(RegistryError::InvalidResponse(format!(
                "expected an empty acknowledgment, got {other:?}"
            ))),
        }
    }
}

/// Turns a successful (2xx) response into a [`Decoded`] value.
///
/// When a HeartBeater is attached, its session id is back-filled from the
/// `Location` header and its token seeded from the body's `token` field,
/// which is what lets the very first heartbeat tick succeed without a
/// prior heartbeat call.
pub(crate) fn decode(
    response: &TransportResponse,
    heartbeater: Option<&mut HeartBeater>,
) -> Result<Decoded> {
    match response.status {
        204 => Ok(Decoded::Acknowledged),
        201 => {
            let location = response.header("location").ok_or_else(|| {
                RegistryError::InvalidResponse(
                    "created response without a Location header".to_string(),
                )
            })?;
            let id = location
                .rsplit('/')
                .next()
                .unwrap_or(location)
                .to_string();

            let body = if response.body.is_empty() {
                None
            } else {
                Some(serde_json::from_slice::<Value>(&response.body)?)
            };

            if let Some(heartbeater) = heartbeater {
                heartbeater.bind_session(&id);
                if let Some(token) = body.as_ref().and_then(token_field) {
                    heartbeater.seed_token(token);
                }
            }

            Ok(Decoded::Created { id, body })
        }
        _ => {
            let body: Value = serde_json::from_slice(&response.body)?;
            if let Some(heartbeater) = heartbeater
                && let Some(token) = token_field(&body)
            {
                heartbeater.seed_token(token);
            }
            Ok(Decoded::Resource(body))
        }
    }
}

fn token_field(body: &Value) -> Option<&str> {
    body.get("token").and_then(Value::as_str)
}
