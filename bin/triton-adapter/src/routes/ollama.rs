//! Ollama-compatible chat and model listing.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tracing::warn;
use utoipa::OpenApi;

use crate::dialect;
use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::schemas::ollama::{
    ChatOptions, ModelDetails, OllamaChatRequest, OllamaChatResponse, OllamaModel, TagsResponse,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(chat, tags),
    components(schemas(
        ChatOptions,
        OllamaChatRequest,
        OllamaChatResponse,
        ModelDetails,
        OllamaModel,
        TagsResponse
    ))
)]
pub struct OllamaApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/tags", get(tags))
}

/// Ollama chat (`POST /api/chat`). Always answers with one complete message.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "ollama",
    request_body = OllamaChatRequest,
    responses(
        (status = 200, description = "Chat reply", body = OllamaChatResponse),
        (status = 422, description = "Malformed request"),
        (status = 500, description = "Upstream inference error"),
        (status = 503, description = "Upstream or model unavailable"),
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<OllamaChatRequest>,
) -> Result<Json<OllamaChatResponse>, ServerError> {
    let canonical = dialect::ollama::parse(&req)?;
    let resp = state.upstream.generate(&canonical).await?;
    Ok(Json(dialect::ollama::format(resp, req.model, Utc::now())))
}

/// List the served model (`GET /api/tags`).
///
/// The list is empty whenever the upstream cannot serve the model.
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "ollama",
    responses(
        (status = 200, description = "Available models", body = TagsResponse)
    )
)]
pub async fn tags(State(state): State<Arc<AppState>>) -> Json<TagsResponse> {
    let serving = match state.upstream.health().await {
        Ok(snapshot) => snapshot.is_serving(),
        Err(e) => {
            warn!(error = %e, "model listing failed");
            false
        }
    };

    let models = if serving {
        vec![dialect::ollama::model_entry(state.upstream.model(), Utc::now())]
    } else {
        Vec::new()
    };
    Json(TagsResponse { models })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
