//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use triton_client::UpstreamClient;

use crate::config::Config;

/// Immutable state shared by all handlers; nothing here changes per request.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Adapter configuration (env-derived).
    pub config: Arc<Config>,
    /// Client bound to the configured transport and model.
    pub upstream: UpstreamClient,
}
