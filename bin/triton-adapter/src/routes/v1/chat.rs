//! OpenAI-compatible chat-completion route.
//!
//! The conversation is flattened into a single prompt and sent upstream as
//! one non-streaming inference call.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use tracing::debug;
use utoipa::OpenApi;

use crate::dialect;
use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::schemas::message::ChatMessage;
use crate::schemas::v1::chat::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, Usage};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(chat_completions),
    components(schemas(
        ChatCompletionRequest,
        ChatCompletionResponse,
        ChatMessage,
        ChatChoice,
        Usage
    ))
)]
pub struct ChatApi;

/// Register chat-completion routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat/completions", post(chat_completions))
}

/// OpenAI chat completions (`POST /v1/chat/completions`).
///
/// `stream: true` is accepted, but the reply is always a single
/// `chat.completion` object.
#[utoipa::path(
    post,
    path = "/v1/chat/completions",
    tag = "chat",
    request_body = ChatCompletionRequest,
    responses(
        (status = 200, description = "Completion generated", body = ChatCompletionResponse),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Upstream inference error"),
        (status = 503, description = "Upstream or model unavailable"),
    )
)]
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ChatCompletionRequest>,
) -> Result<Json<ChatCompletionResponse>, ServerError> {
    let canonical = dialect::openai::parse(&req)?;
    debug!(messages = req.messages.len(), "chat completion request");

    let resp = state.upstream.generate(&canonical).await?;

    let model = req
        .model
        .unwrap_or_else(|| state.upstream.model().to_owned());
    Ok(Json(dialect::openai::format(
        resp,
        &canonical.prompt,
        model,
        Utc::now(),
    )))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
