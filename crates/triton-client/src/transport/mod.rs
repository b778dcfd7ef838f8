//! Pluggable upstream transports.
//!
//! Both the gRPC and the REST flavour of the KServe v2 protocol implement
//! [`InferenceTransport`]; [`connect`] picks one from [`TransportConfig`] once
//! at startup so call sites never branch on the protocol.

pub mod grpc;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{InferenceRequest, Protocol};

pub use grpc::GrpcTransport;
pub use http::HttpTransport;

/// Name of the BYTES input carrying the prompt.
pub const TEXT_INPUT: &str = "text_input";
/// Name of the INT32 input carrying the generation budget.
pub const MAX_TOKENS_INPUT: &str = "max_tokens";
/// Optional FP32 sampling inputs.
pub const TEMPERATURE_INPUT: &str = "temperature";
pub const TOP_P_INPUT: &str = "top_p";
/// Name of the BYTES output carrying the generated text.
pub const TEXT_OUTPUT: &str = "text_output";

/// Every tensor exchanged with the model is a single-element batch.
pub const SCALAR_SHAPE: [i64; 2] = [1, 1];

/// Capability interface over one upstream protocol.
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    /// Which wire protocol this transport speaks.
    fn protocol(&self) -> Protocol;

    /// The normalized endpoint URL, for health and metadata responses.
    fn endpoint(&self) -> &str;

    async fn server_live(&self) -> Result<bool, ClientError>;

    async fn server_ready(&self) -> Result<bool, ClientError>;

    /// Readiness check for a single model.
    async fn model_ready(&self, model: &str) -> Result<bool, ClientError>;

    /// Run one inference call and return the decoded `text_output`.
    async fn infer(&self, model: &str, request: &InferenceRequest) -> Result<String, ClientError>;
}

/// The INT32 value of the `max_tokens` input.
pub(crate) fn max_tokens_value(request: &InferenceRequest) -> Result<i32, ClientError> {
    i32::try_from(request.max_tokens).map_err(|_| {
        ClientError::InvalidRequest(format!(
            "invalid max tokens ({}): must be at most {}",
            request.max_tokens,
            i32::MAX
        ))
    })
}

/// Where and how to reach the upstream server.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub protocol: Protocol,
    /// REST endpoint, e.g. `triton:8001`.
    pub http_url: String,
    /// gRPC endpoint, e.g. `triton:8002`.
    pub grpc_url: String,
    /// Also send `temperature` / `top_p` tensors with every inference call.
    pub send_sampling_params: bool,
}

impl TransportConfig {
    /// The endpoint of the selected protocol, as configured.
    pub fn active_url(&self) -> &str {
        match self.protocol {
            Protocol::Grpc => &self.grpc_url,
            Protocol::Http => &self.http_url,
        }
    }
}

/// Build the transport selected by `config`.
///
/// The gRPC channel connects lazily, so this must run inside a tokio runtime
/// but does not touch the network.
pub fn connect(config: &TransportConfig) -> Result<Arc<dyn InferenceTransport>, ClientError> {
    let url = normalize_url(config.active_url());
    let transport: Arc<dyn InferenceTransport> = match config.protocol {
        Protocol::Grpc => Arc::new(GrpcTransport::connect_lazy(&url, config.send_sampling_params)?),
        Protocol::Http => Arc::new(HttpTransport::new(&url, config.send_sampling_params)?),
    };
    Ok(transport)
}

/// Accept bare `host:port` endpoints by defaulting the scheme to `http://`.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.contains("://") {
        url.to_owned()
    } else {
        format!("http://{url}")
    }
}
