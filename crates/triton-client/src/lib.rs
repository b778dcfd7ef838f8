//! Upstream side of the adapter: canonical requests, transports, readiness.
//!
//! ```rust,no_run
//! use triton_client::{connect, InferenceRequest, Protocol, TransportConfig, UpstreamClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), triton_client::ClientError> {
//! let transport = connect(&TransportConfig {
//!     protocol: Protocol::Grpc,
//!     http_url: "triton:8001".into(),
//!     grpc_url: "triton:8002".into(),
//!     send_sampling_params: false,
//! })?;
//! let client = UpstreamClient::new(transport, "tinyllama");
//! let out = client
//!     .generate(&InferenceRequest {
//!         prompt: "2+2=".into(),
//!         max_tokens: 5,
//!         temperature: 0.7,
//!         top_p: 0.9,
//!     })
//!     .await?;
//! println!("{}", out.text);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod transport;
mod types;

pub use client::UpstreamClient;
pub use error::ClientError;
pub use transport::{connect, InferenceTransport, TransportConfig};
pub use types::{approximate_tokens, HealthSnapshot, InferenceRequest, InferenceResponse, Protocol};
