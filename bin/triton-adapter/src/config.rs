//! Adapter configuration, loaded from environment variables at startup.

use triton_client::{Protocol, TransportConfig};

/// Runtime configuration for triton-adapter.
///
/// Every field has a default so the adapter starts against a `triton` host on
/// the compose network without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind, built from `ADAPTER_HOST` and `PORT`.
    pub bind_address: String,

    /// Upstream endpoints and the selected protocol.
    pub transport: TransportConfig,

    /// Model served by the upstream (`MODEL_NAME`, default `"tinyllama"`).
    pub model_name: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS origin allow-list; `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI at `/swagger-ui`.
    pub enable_swagger: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        let flag = |key: &str, default: bool| {
            lookup(key)
                .map(|v| v.trim() == "1" || v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(default)
        };

        let port: u16 = lookup("PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(8001);
        let protocol = if flag("USE_GRPC", true) {
            Protocol::Grpc
        } else {
            Protocol::Http
        };

        Self {
            bind_address: format!("{}:{port}", env_or("ADAPTER_HOST", "0.0.0.0")),
            transport: TransportConfig {
                protocol,
                http_url: env_or("TRITON_URL", "triton:8001"),
                grpc_url: env_or("TRITON_GRPC_URL", "triton:8002"),
                send_sampling_params: flag("TRITON_SEND_SAMPLING_PARAMS", false),
            },
            model_name: env_or("MODEL_NAME", "tinyllama"),
            log_level: env_or("ADAPTER_LOG", "info"),
            log_json: flag("ADAPTER_LOG_JSON", false),
            cors_allowed_origins: lookup("ADAPTER_CORS_ORIGINS").filter(|v| !v.trim().is_empty()),
            enable_swagger: flag("ADAPTER_ENABLE_SWAGGER", true),
        }
    }

    /// The upstream URL of the active protocol, as configured.
    pub fn triton_url(&self) -> &str {
        self.transport.active_url()
    }
}
