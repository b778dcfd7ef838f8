//! The one call path every dialect goes through.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::ClientError;
use crate::transport::InferenceTransport;
use crate::types::{HealthSnapshot, InferenceRequest, InferenceResponse, Protocol};

/// Binds a transport to the configured model.
///
/// Holds no per-request state; clones share the same transport.
#[derive(Clone)]
pub struct UpstreamClient {
    transport: Arc<dyn InferenceTransport>,
    model: String,
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("protocol", &self.transport.protocol())
            .field("endpoint", &self.transport.endpoint())
            .field("model", &self.model)
            .finish()
    }
}

impl UpstreamClient {
    pub fn new(transport: Arc<dyn InferenceTransport>, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    pub fn protocol(&self) -> Protocol {
        self.transport.protocol()
    }

    pub async fn is_live(&self) -> Result<bool, ClientError> {
        self.transport.server_live().await
    }

    /// Sample `{live, ready, model_ready}`.
    ///
    /// Server-level probe failures are returned as errors. The model is only
    /// queried when the server is live and ready; a failed model probe counts
    /// as "not ready".
    pub async fn health(&self) -> Result<HealthSnapshot, ClientError> {
        let live = self.transport.server_live().await?;
        let ready = self.transport.server_ready().await?;
        let model_ready = if live && ready {
            self.transport
                .model_ready(&self.model)
                .await
                .unwrap_or_else(|e| {
                    warn!(model = %self.model, error = %e, "model ready check failed");
                    false
                })
        } else {
            false
        };
        Ok(HealthSnapshot {
            live,
            ready,
            model_ready,
        })
    }

    /// Fail fast unless the model can take a request.
    ///
    /// One model-ready query; an unreachable server surfaces as
    /// [`ClientError::Unreachable`].
    pub async fn check_ready(&self) -> Result<(), ClientError> {
        if self.transport.model_ready(&self.model).await? {
            Ok(())
        } else {
            Err(ClientError::ModelNotReady {
                model: self.model.clone(),
            })
        }
    }

    /// Readiness check followed by exactly one inference call.
    pub async fn generate(
        &self,
        request: &InferenceRequest,
    ) -> Result<InferenceResponse, ClientError> {
        self.check_ready().await?;

        let preview: String = request.prompt.chars().take(50).collect();
        info!(
            model = %self.model,
            protocol = %self.protocol(),
            max_tokens = request.max_tokens,
            prompt = %preview,
            "upstream inference"
        );

        let started = Instant::now();
        let text = self.transport.infer(&self.model, request).await?;
        let response = InferenceResponse::new(text, started.elapsed());

        info!(
            chars = response.text.len(),
            tokens = response.tokens,
            elapsed_ms = response.elapsed.as_millis() as u64,
            "generation complete"
        );
        Ok(response)
    }
}
