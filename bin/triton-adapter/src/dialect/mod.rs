//! Inbound parsers and outbound formatters, one module per API dialect.
//!
//! Every parser reduces its body to an [`InferenceRequest`]; every formatter
//! turns the single [`triton_client::InferenceResponse`] back into the
//! dialect's shape. Token counts are whitespace approximations throughout.

pub mod generate;
pub mod ollama;
pub mod openai;

use triton_client::InferenceRequest;

use crate::error::ServerError;

/// Reject canonical requests the upstream models cannot take.
pub(crate) fn validate(request: InferenceRequest) -> Result<InferenceRequest, ServerError> {
    if request.max_tokens == 0 {
        return Err(ServerError::BadRequest(
            "invalid max tokens (0): must be at least 1".into(),
        ));
    }
    // The upstream input is INT32.
    if request.max_tokens > i32::MAX as u32 {
        return Err(ServerError::BadRequest(format!(
            "invalid max tokens ({}): must be at most {}",
            request.max_tokens,
            i32::MAX
        )));
    }
    if !(0.0..=2.0).contains(&request.temperature) {
        return Err(ServerError::BadRequest(format!(
            "invalid temperature ({}): must be between 0.0 and 2.0",
            request.temperature
        )));
    }
    if !(0.0..=1.0).contains(&request.top_p) {
        return Err(ServerError::BadRequest(format!(
            "invalid top_p ({}): must be between 0.0 and 1.0",
            request.top_p
        )));
    }
    Ok(request)
}
