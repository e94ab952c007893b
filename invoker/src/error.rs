use serde_json::Value;
use std::time::Duration;

/// Failure of a single remote call
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// Endpoint could not be reached
    #[error("connection error: {0}")]
    Connection(String),
    /// Remote side declined the call (JSON-RPC error object or non-2xx status)
    #[error("remote call rejected ({code}): {message}")]
    Rejected {
        code: i64,
        message: String,
        data: Option<Value>,
    },
    /// No response within the configured bound
    #[error("no response within {0:?}")]
    Timeout(Duration),
    /// Caller cancelled the call through its token
    #[error("remote call cancelled")]
    Cancelled,
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl InvokeError {
    /// Custom program error code carried by a rejection, if any
    ///
    /// Looks for `data.err = {"InstructionError": [<index>, {"Custom": <code>}]}`.
    pub fn custom_code(&self) -> Option<u32> {
        let InvokeError::Rejected { data: Some(data), .. } = self else {
            return None;
        };

        data.get("err")?
            .get("InstructionError")?
            .get(1)?
            .get("Custom")?
            .as_u64()
            .and_then(|code| u32::try_from(code).ok())
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, InvokeError::Connection(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, InvokeError::Timeout(_))
    }
}
