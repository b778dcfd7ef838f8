//! OpenAI-style chat completions.

use chrono::{DateTime, Utc};
use tracing::debug;
use triton_client::{approximate_tokens, InferenceRequest, InferenceResponse};

use crate::error::ServerError;
use crate::prompt::format_prompt;
use crate::schemas::message::ChatMessage;
use crate::schemas::v1::chat::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, Usage};

pub fn parse(req: &ChatCompletionRequest) -> Result<InferenceRequest, ServerError> {
    if req.stream {
        debug!("stream requested; returning a complete response instead");
    }
    super::validate(InferenceRequest {
        prompt: format_prompt(&req.messages),
        max_tokens: req.max_tokens,
        temperature: req.temperature,
        top_p: req.top_p,
    })
}

/// Build the completion envelope; `prompt` is the flattened prompt that was sent.
pub fn format(
    resp: InferenceResponse,
    prompt: &str,
    model: String,
    now: DateTime<Utc>,
) -> ChatCompletionResponse {
    let prompt_tokens = approximate_tokens(prompt);
    let completion_tokens = resp.tokens;
    ChatCompletionResponse {
        id: format!("chatcmpl-{}", now.timestamp()),
        object: "chat.completion".into(),
        created: now.timestamp(),
        model,
        choices: vec![ChatChoice {
            index: 0,
            message: ChatMessage::assistant(resp.text),
            finish_reason: "stop".into(),
        }],
        usage: Usage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        },
    }
}
