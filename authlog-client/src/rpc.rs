//! JSON-RPC transport.
//!
//! Every ledger call is a single HTTP POST carrying a JSON-RPC 2.0
//! envelope. The transport is a trait so tests (and alternative wire
//! stacks) can substitute the network; see [`crate::mock::MockTransport`].

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::{ClientError, Result};

/// Transport seam for JSON-RPC calls.
///
/// Implementations hold only read-only configuration and are safe to share
/// across concurrent calls.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Invoke `method` with `params`, returning the envelope's `result`
    /// field verbatim.
    async fn call(&self, method: &str, params: Value) -> Result<Value>;
}

/// Production transport: HTTP POST via reqwest.
///
/// No timeout is applied at this layer; callers wrap calls with their own
/// cancellation primitive if needed.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(ClientError::InvalidArgument(
                "RPC endpoint must not be empty".to_string(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let envelope = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!(method, endpoint = %self.endpoint, "rpc call");
        let response = self.client.post(&self.endpoint).json(&envelope).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Transport {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let body: Value = response.json().await?;
        unwrap_envelope(body)
    }
}

/// Extract `result` from a JSON-RPC response envelope.
///
/// An `error` member is surfaced with the remote code and message; a
/// missing `result` is a malformed envelope.
pub(crate) fn unwrap_envelope(body: Value) -> Result<Value> {
    if let Some(err) = body.get("error") {
        let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string();
        return Err(ClientError::Rpc { code, message });
    }

    match body.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err(ClientError::MalformedResponse(
            "envelope has neither result nor error".to_string(),
        )),
    }
}
