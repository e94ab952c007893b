//! Asynchronous remote procedure invocation against a JSON-RPC endpoint.
//!
//! ```no_run
//! # async fn run() -> Result<(), research_invoker::InvokeError> {
//! use research_invoker::{Config, Invoker, RemoteCallRequest};
//!
//! let invoker = Invoker::new(&Config::default())?;
//! let request = RemoteCallRequest::new("initialize", vec![])?;
//! let signature = invoker.invoke(&request).await?;
//! println!("Your transaction signature {}", signature);
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod invoker;
pub mod procedures;
pub mod request;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use config::Config;
pub use error::InvokeError;
pub use invoker::Invoker;
pub use procedures::{ProgramError, Procedure};
pub use request::{CallStatus, RemoteCallRequest, Signature};
