//! Health views: composite `/health` plus the bare Triton-style probes.
//!
//! All of them sample the upstream fresh on every call.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use triton_client::{ClientError, HealthSnapshot};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::health::{HealthResponse, ProbeStatus};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(get_health, get_live, get_ready),
    components(schemas(HealthResponse, ProbeStatus))
)]
pub struct HealthApi;

/// Register health-check routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(get_health))
        .route("/v2/health/live", get(get_live))
        .route("/v2/health/ready", get(get_ready))
}

/// Map a probe result to the `/health` status string and `model_loaded`.
pub(crate) fn reconcile(result: &Result<HealthSnapshot, ClientError>) -> (&'static str, bool) {
    match result {
        Ok(snapshot) if snapshot.is_ok() => ("ok", snapshot.model_ready),
        Ok(snapshot) => ("degraded", snapshot.model_ready),
        Err(_) => ("error", false),
    }
}

/// Composite health check.
///
/// Always answers 200; callers read `status` and `model_loaded`.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Upstream status", body = HealthResponse)
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let result = state.upstream.health().await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "health check failed");
    }
    let (status, model_loaded) = reconcile(&result);
    Json(HealthResponse {
        status: status.to_owned(),
        model_loaded,
        triton_url: state.config.triton_url().to_owned(),
        model_name: state.upstream.model().to_owned(),
    })
}

/// Upstream liveness passthrough.
#[utoipa::path(
    get,
    path = "/v2/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Upstream is live", body = ProbeStatus),
        (status = 503, description = "Upstream is not live"),
    )
)]
pub async fn get_live(State(state): State<Arc<AppState>>) -> Result<Json<ProbeStatus>, ServerError> {
    match state.upstream.is_live().await {
        Ok(true) => Ok(Json(ProbeStatus {
            status: "live".into(),
        })),
        _ => Err(ServerError::Unavailable("Not live".into())),
    }
}

/// Upstream readiness passthrough: server ready and model ready.
#[utoipa::path(
    get,
    path = "/v2/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Model is ready", body = ProbeStatus),
        (status = 503, description = "Not ready"),
    )
)]
pub async fn get_ready(State(state): State<Arc<AppState>>) -> Result<Json<ProbeStatus>, ServerError> {
    match state.upstream.health().await {
        Ok(snapshot) if snapshot.is_serving() => Ok(Json(ProbeStatus {
            status: "ready".into(),
        })),
        _ => Err(ServerError::Unavailable("Not ready".into())),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
