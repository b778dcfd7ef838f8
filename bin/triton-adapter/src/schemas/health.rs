use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `"ok"`, `"degraded"` or `"error"`.
    pub status: String,
    /// Whether the configured model reports ready.
    pub model_loaded: bool,
    /// Upstream endpoint of the active protocol.
    pub triton_url: String,
    pub model_name: String,
}

/// Body of the bare liveness / readiness endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProbeStatus {
    /// `"live"` or `"ready"`.
    pub status: String,
}

/// Response body for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub triton_url: String,
    pub model: String,
    /// `"gRPC"` or `"HTTP"`.
    pub protocol: String,
    /// `"METHOD /path"` → one-line description.
    pub endpoints: BTreeMap<String, String>,
}
