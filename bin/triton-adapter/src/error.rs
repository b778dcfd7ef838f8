//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are converted to a JSON-body
//! HTTP response with an appropriate status code.
//!
//! Upstream failures keep their message: a failed inference call surfaces the
//! upstream error text to the caller.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use triton_client::ClientError;

/// All errors that can occur in the adapter request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The body could not be decoded into the dialect's request type.
    #[error("invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// The body decoded but carries out-of-range values.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request body exceeds the buffering limit.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// A health probe answered "no".
    #[error("{0}")]
    Unavailable(String),

    /// Propagated from the upstream client.
    #[error(transparent)]
    Upstream(#[from] ClientError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidBody(rejection) => rejection.status(),
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Upstream(e) => match e {
                ClientError::InvalidEndpoint { .. }
                | ClientError::Unreachable(_)
                | ClientError::ModelNotReady { .. } => StatusCode::SERVICE_UNAVAILABLE,
                ClientError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                ClientError::Inference(_) | ClientError::Protocol(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ServerError::InvalidBody(rejection) => rejection.body_text(),
            ServerError::BadRequest(m) | ServerError::Unavailable(m) => m.clone(),
            ServerError::PayloadTooLarge { .. } => self.to_string(),
            ServerError::Upstream(ClientError::Unreachable(_)) => {
                "Triton server unavailable".to_owned()
            }
            ServerError::Upstream(e) => e.to_string(),
        };

        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn not_ready_and_unreachable_are_503() {
        let not_ready = ServerError::from(ClientError::ModelNotReady {
            model: "tinyllama".into(),
        });
        assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);

        let unreachable = ServerError::from(ClientError::Unreachable("refused".into()));
        assert_eq!(unreachable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn inference_failure_is_500() {
        let err = ServerError::from(ClientError::Inference("CUDA out of memory".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "CUDA out of memory");
    }

    #[test]
    fn unencodable_request_is_400() {
        let err = ServerError::from(ClientError::InvalidRequest("too many tokens".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn bad_request_is_400() {
        let err = ServerError::BadRequest("max_tokens must be at least 1".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
