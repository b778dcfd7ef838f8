//! OpenAI-compatible chat-completion types.
//!
//! Kept compatible with the OpenAI REST API so that existing OpenAI SDK
//! clients work without modification (non-streaming only).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schemas::generate::{default_temperature, default_top_p};
use crate::schemas::message::ChatMessage;

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatCompletionRequest {
    /// Model identifier echoed in the response; defaults to the served model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Conversation history, flattened into a single prompt.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate (default `512`).
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature in [0, 2].
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus sampling mass in [0, 1].
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Accepted but not honored: responses are always returned in one piece.
    #[serde(default)]
    pub stream: bool,
}

fn default_max_tokens() -> u32 {
    512
}

/// A single choice in the completion response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatChoice {
    /// Zero-based index of this choice.
    pub index: u32,
    /// The generated message.
    pub message: ChatMessage,
    /// Always `"stop"`.
    pub finish_reason: String,
}

/// Approximate token accounting.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// Response body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatCompletionResponse {
    /// `chatcmpl-<unix seconds>`.
    pub id: String,
    /// Always `"chat.completion"`.
    pub object: String,
    /// Unix timestamp of when the response was created.
    pub created: i64,
    /// Model that produced the completion.
    pub model: String,
    /// Generated choices (always exactly one).
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}
