//! JSON-RPC invoker
//!
//! Sends one procedure call to the configured endpoint and waits for the
//! transaction signature. Each call issues exactly one HTTP request; failures
//! are returned to the caller without retrying.

use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::config::Config;
use crate::error::InvokeError;
use crate::request::{CallStatus, RemoteCallRequest, Signature};

const STATUS_METHOD: &str = "getSignatureStatuses";

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    value: Vec<Option<CallStatus>>,
}

/// Client for a single pre-configured endpoint
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Invoker {
    client: reqwest::Client,
    rpc_url: String,
    timeout: Duration,
}

impl Invoker {
    /// Create a new invoker
    ///
    /// # Arguments
    /// * `config` - Endpoint URL and timeouts
    pub fn new(config: &Config) -> Result<Self, InvokeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| {
                InvokeError::Connection(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            rpc_url: config.rpc_url.clone(),
            timeout: config.timeout,
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Invoke a remote procedure and return its transaction signature
    pub async fn invoke(&self, request: &RemoteCallRequest) -> Result<Signature, InvokeError> {
        info!(
            procedure = %request.procedure(),
            args = request.args().len(),
            "Submitting remote call"
        );

        let result = self.call(request).await;

        let signature = result.and_then(|value| match value {
            Value::String(raw) => Signature::parse(raw),
            other => Err(InvokeError::InvalidResponse(format!(
                "expected signature string, got {}",
                other
            ))),
        });

        match &signature {
            Ok(sig) => info!(procedure = %request.procedure(), signature = %sig, "Remote call accepted"),
            Err(e) => warn!(procedure = %request.procedure(), error = %e, "Remote call failed"),
        }

        signature
    }

    /// Like [`Invoker::invoke`], but gives up as soon as `token` is cancelled
    ///
    /// A token cancelled before submission sends nothing. Cancelling after
    /// submission only abandons the wait; the remote side may still execute
    /// the call.
    pub async fn invoke_with_cancel(
        &self,
        request: &RemoteCallRequest,
        token: &CancelToken,
    ) -> Result<Signature, InvokeError> {
        if token.is_cancelled() {
            debug!(procedure = %request.procedure(), "Token cancelled before submission");
            return Err(InvokeError::Cancelled);
        }

        let mut token = token.clone();
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!(procedure = %request.procedure(), "Remote call cancelled");
                Err(InvokeError::Cancelled)
            }
            result = self.invoke(request) => result,
        }
    }

    /// Look up the outcome of a previously submitted call
    ///
    /// Returns `Ok(None)` when the endpoint does not know the signature.
    /// Single lookup; does not wait for confirmation.
    pub async fn status(&self, signature: &Signature) -> Result<Option<CallStatus>, InvokeError> {
        let request = RemoteCallRequest::new(STATUS_METHOD, vec![json!([signature.as_str()])])?;
        let value = self.call(&request).await?;

        let envelope: StatusEnvelope = serde_json::from_value(value).map_err(|e| {
            InvokeError::InvalidResponse(format!("malformed status response: {}", e))
        })?;

        let status = envelope.value.into_iter().next().flatten();
        debug!(signature = %signature, found = status.is_some(), "Signature status");
        Ok(status)
    }

    /// Send one JSON-RPC request and return its `result` value
    async fn call(&self, request: &RemoteCallRequest) -> Result<Value, InvokeError> {
        let id = uuid::Uuid::new_v4().to_string();
        let body = request.to_json_rpc(&id);

        debug!(id = %id, method = %request.procedure(), url = %self.rpc_url, "RPC request");

        match tokio::time::timeout(self.timeout, self.send(&body)).await {
            Ok(result) => result,
            Err(_) => Err(InvokeError::Timeout(self.timeout)),
        }
    }

    async fn send(&self, body: &Value) -> Result<Value, InvokeError> {
        let response = self
            .client
            .post(&self.rpc_url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(InvokeError::Rejected {
                code: i64::from(status.as_u16()),
                message: if error_text.is_empty() {
                    status.to_string()
                } else {
                    error_text
                },
                data: None,
            });
        }

        let text = response.text().await.map_err(|e| self.classify(e))?;
        debug!(len = text.len(), "RPC response");
        tracing::trace!("RPC response body: {}", text);

        let envelope: RpcResponse = serde_json::from_str(&text).map_err(|e| {
            InvokeError::InvalidResponse(format!("failed to parse RPC response: {}", e))
        })?;

        if let Some(error) = envelope.error {
            return Err(InvokeError::Rejected {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        envelope
            .result
            .ok_or_else(|| InvokeError::InvalidResponse("response has neither result nor error".into()))
    }

    fn classify(&self, e: reqwest::Error) -> InvokeError {
        if e.is_connect() {
            InvokeError::Connection(e.to_string())
        } else if e.is_timeout() {
            InvokeError::Timeout(self.timeout)
        } else {
            InvokeError::Connection(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoker_creation() {
        let invoker = Invoker::new(&Config::new("http://127.0.0.1:8899"));

        assert!(invoker.is_ok());
        assert_eq!(invoker.unwrap().rpc_url(), "http://127.0.0.1:8899");
    }

    #[test]
    fn test_error_envelope_parsing() {
        let envelope: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":"1","error":{"code":-32601,"message":"Method not found"}}"#,
        )
        .unwrap();

        assert!(envelope.result.is_none());
        let error = envelope.error.unwrap();
        assert_eq!(error.code, -32601);
        assert!(error.data.is_none());
    }

    #[test]
    fn test_status_envelope_with_unknown_signature() {
        let envelope: StatusEnvelope =
            serde_json::from_value(json!({ "context": { "slot": 9 }, "value": [null] })).unwrap();

        assert_eq!(envelope.value.len(), 1);
        assert!(envelope.value[0].is_none());
    }
}
