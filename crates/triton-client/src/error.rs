use thiserror::Error;

/// Failures talking to the upstream inference server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured endpoint could not be turned into a client.
    #[error("invalid upstream endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// The server could not be reached (connect failure, transport down).
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The server answered but the model is not ready to serve.
    #[error("Model '{model}' not ready")]
    ModelNotReady { model: String },

    /// The request cannot be encoded for the model's inputs.
    #[error("{0}")]
    InvalidRequest(String),

    /// The inference call failed or returned an error payload.
    #[error("{0}")]
    Inference(String),

    /// The server answered with a payload the adapter cannot interpret.
    #[error("unexpected upstream response: {0}")]
    Protocol(String),
}

impl From<triton_proto::TensorError> for ClientError {
    fn from(e: triton_proto::TensorError) -> Self {
        ClientError::Protocol(e.to_string())
    }
}
