//! OpenVINO-style `/generate`: fields map one to one.

use tracing::debug;
use triton_client::{InferenceRequest, InferenceResponse};

use crate::error::ServerError;
use crate::schemas::generate::{GenerateRequest, GenerateResponse};

pub fn parse(req: &GenerateRequest) -> Result<InferenceRequest, ServerError> {
    debug!(top_k = req.top_k, "top_k is not forwarded upstream");
    super::validate(InferenceRequest {
        prompt: req.prompt.clone(),
        max_tokens: req.max_new_tokens,
        temperature: req.temperature,
        top_p: req.top_p,
    })
}

pub fn format(resp: InferenceResponse, model: &str) -> GenerateResponse {
    GenerateResponse {
        tokens_generated: resp.tokens,
        response: resp.text,
        model: model.to_owned(),
    }
}
