//! OpenVINO-compatible text generation (`POST /generate`).

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::dialect;
use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::schemas::generate::{GenerateRequest, GenerateResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(generate),
    components(schemas(GenerateRequest, GenerateResponse))
)]
pub struct GenerateApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(generate))
}

/// Generate text from a raw prompt.
#[utoipa::path(
    post,
    path = "/generate",
    tag = "generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Text generated", body = GenerateResponse),
        (status = 422, description = "Malformed request"),
        (status = 500, description = "Upstream inference error"),
        (status = 503, description = "Upstream or model unavailable"),
    )
)]
pub async fn generate(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ServerError> {
    let canonical = dialect::generate::parse(&req)?;
    let resp = state.upstream.generate(&canonical).await?;
    Ok(Json(dialect::generate::format(resp, state.upstream.model())))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
