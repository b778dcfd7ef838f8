//! Ollama-compatible `/api/chat` and `/api/tags` types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schemas::message::ChatMessage;

/// Generation options; only `num_predict` is honored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChatOptions {
    /// Maximum tokens to generate (default `512`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OllamaChatRequest {
    /// Model name, echoed in the response.
    pub model: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ChatOptions>,
    /// Accepted but not honored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OllamaChatResponse {
    pub model: String,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
    pub message: ChatMessage,
    /// Always `true`.
    pub done: bool,
    /// Nanoseconds spent in the upstream inference call.
    pub total_duration: u64,
    /// Whitespace-separated word count of the reply.
    pub eval_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelDetails {
    pub format: String,
    pub family: String,
    pub parameter_size: String,
    pub quantization_level: String,
}

/// One entry of `GET /api/tags`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OllamaModel {
    pub name: String,
    pub model: String,
    pub modified_at: String,
    pub size: u64,
    pub digest: String,
    pub details: ModelDetails,
}

/// Response body for `GET /api/tags`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagsResponse {
    pub models: Vec<OllamaModel>,
}
