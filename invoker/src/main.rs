use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{error, info};

use research_invoker::{Config, Invoker, ProgramError, RemoteCallRequest};

/// Usage: research-invoker [PROCEDURE] [JSON_ARG...]
///
/// Defaults to `initialize` with no arguments.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "research_invoker=info".into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!("RPC endpoint: {}", config.rpc_url);
    info!("Timeout: {:?}", config.timeout);

    let mut args = std::env::args().skip(1);
    let procedure = args.next().unwrap_or_else(|| "initialize".to_string());
    let params = parse_params(args);

    let request = RemoteCallRequest::new(procedure, params).context("Invalid request")?;
    let invoker = Invoker::new(&config).context("Failed to create invoker")?;

    match invoker.invoke(&request).await {
        Ok(signature) => {
            println!("Your transaction signature {}", signature);
            Ok(())
        }
        Err(e) => {
            if e.is_connection() {
                error!("Endpoint {} is unreachable", invoker.rpc_url());
            } else if e.is_timeout() {
                error!("Endpoint {} did not answer within {:?}", invoker.rpc_url(), config.timeout);
            } else if let Some(program_error) = ProgramError::from_rejection(&e) {
                error!("Program error: {:?}", program_error);
            }
            Err(e).with_context(|| format!("Failed to invoke {}", request.procedure()))
        }
    }
}

/// Each argument is taken as JSON when it parses, otherwise as a plain string
fn parse_params(args: impl IntoIterator<Item = String>) -> Vec<Value> {
    args.into_iter()
        .map(|raw| serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
        .collect()
}
