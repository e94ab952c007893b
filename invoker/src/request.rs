//! Request and result types for a single remote call

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::error::InvokeError;

/// Procedure name plus positional arguments
///
/// Fields are private so a request cannot change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCallRequest {
    procedure: String,
    args: Vec<Value>,
}

impl RemoteCallRequest {
    /// Build a request; fails if `procedure` is empty or blank
    pub fn new(procedure: impl Into<String>, args: Vec<Value>) -> Result<Self, InvokeError> {
        let procedure = procedure.into();
        if procedure.trim().is_empty() {
            return Err(InvokeError::InvalidRequest(
                "procedure name cannot be empty".to_string(),
            ));
        }

        Ok(Self { procedure, args })
    }

    pub fn procedure(&self) -> &str {
        &self.procedure
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// JSON-RPC 2.0 envelope for this request
    pub fn to_json_rpc(&self, id: &str) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": self.procedure,
            "params": self.args,
        })
    }
}

/// Transaction signature returned by a successful call
///
/// Opaque to this crate; guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn parse(raw: impl Into<String>) -> Result<Self, InvokeError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvokeError::InvalidResponse(
                "empty transaction signature".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a submitted call as reported by the endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallStatus {
    pub slot: u64,
    /// None once the cluster has rooted the transaction
    pub confirmations: Option<u64>,
    /// Execution error, None on success
    pub err: Option<Value>,
    pub confirmation_status: Option<String>,
}

impl CallStatus {
    pub fn succeeded(&self) -> bool {
        self.err.is_none()
    }
}
