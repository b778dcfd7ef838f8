//! Service metadata (`GET /`).

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::schemas::health::ServiceInfo;
use crate::state::AppState;

const ENDPOINTS: [(&str, &str); 8] = [
    ("POST /generate", "Text generation (OpenVINO-compatible)"),
    ("POST /v1/chat/completions", "Chat completion (OpenAI-compatible)"),
    ("POST /api/chat", "Chat (Ollama-compatible)"),
    ("GET /api/tags", "Model listing (Ollama-compatible)"),
    ("GET /health", "Health check with model status"),
    ("GET /v2/health/ready", "Upstream readiness"),
    ("GET /v2/health/live", "Upstream liveness"),
    ("GET /", "Service metadata"),
];

#[derive(OpenApi)]
#[openapi(paths(get_info), components(schemas(ServiceInfo)))]
pub struct InfoApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_info))
}

/// Describe the adapter and the upstream it fronts.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service metadata", body = ServiceInfo)
    )
)]
pub async fn get_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Triton Adapter".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        description: "OpenVINO, OpenAI and Ollama compatible API for Triton Inference Server".into(),
        triton_url: state.config.triton_url().to_owned(),
        model: state.upstream.model().to_owned(),
        protocol: state.upstream.protocol().to_string(),
        endpoints: ENDPOINTS
            .iter()
            .map(|(route, what)| ((*route).to_owned(), (*what).to_owned()))
            .collect(),
    })
}

#[cfg(test)]
mod test {
    use crate::testing::{call, state, MockTransport, MODEL};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn describes_the_upstream() {
        let mock = MockTransport::with_health(false, false, false);
        let (status, body) = call(state(mock.clone()), "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Triton Adapter");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(body["model"], MODEL);
        assert_eq!(body["protocol"], "gRPC");
        assert_eq!(body["triton_url"], "triton:8002");
        assert_eq!(body["endpoints"].as_object().map(|m| m.len()), Some(8));
        assert!(body["endpoints"]["POST /v1/chat/completions"].is_string());
        assert!(mock.calls().is_empty());
    }
}
