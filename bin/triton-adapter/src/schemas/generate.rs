//! OpenVINO-compatible `/generate` types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Raw prompt, forwarded as-is.
    pub prompt: String,
    /// Maximum tokens to generate (default `200`).
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,
    /// Sampling temperature in [0, 2] (default `0.7`).
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus sampling mass in [0, 1] (default `0.9`).
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Accepted for compatibility; not forwarded upstream.
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_max_new_tokens() -> u32 {
    200
}

pub(crate) fn default_temperature() -> f32 {
    0.7
}

pub(crate) fn default_top_p() -> f32 {
    0.9
}

fn default_top_k() -> u32 {
    50
}

/// Response body for `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    /// Generated text.
    pub response: String,
    /// Whitespace-separated word count of `response`.
    pub tokens_generated: usize,
    /// Model that produced the text.
    pub model: String,
}
