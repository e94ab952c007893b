use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Local cluster endpoint used when `RPC_URL` is not set
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 10;

/// Endpoint configuration handed to the invoker at construction
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint URL (http or https)
    pub rpc_url: String,
    /// Upper bound for a whole call: connect, send and read the response
    pub timeout: Duration,
    /// Upper bound for establishing the TCP connection
    pub connect_timeout: Duration,
}

impl Config {
    /// Configuration for `rpc_url` with default timeouts
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECONDS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Load configuration from environment variables
    ///
    /// Optional environment variables (with defaults):
    /// - RPC_URL: JSON-RPC endpoint (default: http://127.0.0.1:8899)
    /// - RPC_TIMEOUT_SECONDS: Whole-call timeout (default: 30)
    /// - RPC_CONNECT_TIMEOUT_SECONDS: Connect timeout (default: 10)
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenv::dotenv().ok();

        let rpc_url = env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());

        let timeout_seconds = env::var("RPC_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECONDS.to_string())
            .parse::<u64>()
            .context("RPC_TIMEOUT_SECONDS must be a valid number")?;

        let connect_timeout_seconds = env::var("RPC_CONNECT_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| DEFAULT_CONNECT_TIMEOUT_SECONDS.to_string())
            .parse::<u64>()
            .context("RPC_CONNECT_TIMEOUT_SECONDS must be a valid number")?;

        Ok(Self {
            rpc_url,
            timeout: Duration::from_secs(timeout_seconds),
            connect_timeout: Duration::from_secs(connect_timeout_seconds),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.rpc_url.is_empty() {
            anyhow::bail!("RPC URL cannot be empty");
        }

        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            anyhow::bail!("RPC URL must start with http:// or https://, got {}", self.rpc_url);
        }

        if self.timeout.is_zero() {
            anyhow::bail!("RPC timeout must be positive");
        }

        if self.connect_timeout.is_zero() {
            anyhow::bail!("RPC connect timeout must be positive");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_RPC_URL)
    }
}
