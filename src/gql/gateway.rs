//! HTTP gateway to the remote GraphQL endpoint.
//!
//! One POST per [`send`](Gateway::send); no automatic retries. Failures are
//! classified into transport problems (unreachable endpoint, non-2xx,
//! undecodable body) and application errors (the server's GraphQL error
//! envelope). Retry policy belongs to the operator re-issuing the action.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::query::Operation;
use crate::session::Session;

/// Failure surfaced by the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GatewayError {
    /// Network unreachable, non-2xx status, or malformed response body.
    Transport(String),
    /// Well-formed response whose envelope flags the operation as failed;
    /// carries the server-supplied message list.
    Application(Vec<String>),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Application(msgs) => write!(f, "server rejected operation: {}", msgs.join("; ")),
        }
    }
}

impl std::error::Error for GatewayError {}

/// GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    /// Payload object keyed by root field, absent on total failure.
    data: Option<Value>,
    /// Server-side error list, present when the operation failed.
    errors: Option<Vec<ErrorEntry>>,
}

/// One entry of the envelope's error list.
#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: String,
}

/// Client for the single configured GraphQL endpoint.
pub struct Gateway {
    client: reqwest::Client,
    endpoint: String,
}

impl Gateway {
    /// What: Build a gateway with a pooled HTTP client.
    ///
    /// Inputs:
    /// - `endpoint`: The service URL; every operation POSTs here.
    /// - `session`: Operator session whose token becomes the bearer header.
    ///
    /// Output: A ready gateway. Connection pooling is enabled by default in
    /// `reqwest::Client`; connect/read timeouts keep a dead endpoint from
    /// wedging the workers.
    pub fn new(endpoint: String, session: &Session) -> Self {
        use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&format!("Bearer {}", session.token())) {
            Ok(mut hv) => {
                hv.set_sensitive(true);
                headers.insert(AUTHORIZATION, hv);
            }
            Err(e) => {
                warn!(error = %e, "access token not representable as header; sending unauthenticated");
            }
        }
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(format!("newsdeck/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .expect("failed to create HTTP client");
        Self { client, endpoint }
    }

    /// What: Execute one operation against the endpoint.
    ///
    /// Inputs:
    /// - `op`: The typed operation to serialize and send.
    ///
    /// Output: The payload under the operation's root field (possibly JSON
    /// `null` for by-id misses), or a classified [`GatewayError`].
    ///
    /// # Errors
    /// - `Transport` when the request cannot be sent, the status is non-2xx,
    ///   or the body is not a decodable envelope.
    /// - `Application` when the envelope carries a non-empty error list.
    pub async fn send(&self, op: &Operation) -> Result<Value, GatewayError> {
        let body = json!({ "query": op.document(), "variables": op.variables() });
        debug!(field = op.root_field(), endpoint = %self.endpoint, "sending operation");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, field = op.root_field(), "request failed");
                GatewayError::Transport(format!("network error: {e}"))
            })?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, field = op.root_field(), "endpoint returned error status");
            return Err(GatewayError::Transport(format!("HTTP {status}")));
        }
        let envelope: Value = response.json().await.map_err(|e| {
            warn!(error = %e, field = op.root_field(), "undecodable response body");
            GatewayError::Transport(format!("malformed response body: {e}"))
        })?;
        extract_payload(op, envelope)
    }
}

/// What: Classify a decoded response envelope and pull out the payload.
///
/// Inputs:
/// - `op`: The originating operation (names the root field).
/// - `envelope`: The decoded response body.
///
/// Output: The value under `data.<root_field>`; `Application` for a server
/// error list; `Transport` when the envelope has neither data nor errors.
fn extract_payload(op: &Operation, envelope: Value) -> Result<Value, GatewayError> {
    let envelope: Envelope = serde_json::from_value(envelope)
        .map_err(|e| GatewayError::Transport(format!("unrecognized envelope: {e}")))?;
    if let Some(errors) = envelope.errors
        && !errors.is_empty()
    {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        warn!(?messages, field = op.root_field(), "operation rejected by server");
        return Err(GatewayError::Application(messages));
    }
    let data = envelope
        .data
        .ok_or_else(|| GatewayError::Transport("response missing data payload".to_string()))?;
    data.get(op.root_field()).cloned().ok_or_else(|| {
        GatewayError::Transport(format!("response missing field {}", op.root_field()))
    })
}
