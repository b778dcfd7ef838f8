//! Per-request trace ID, span and access log.
//!
//! Reuses an incoming `x-trace-id` when it is a valid UUID, otherwise mints a
//! new one, and echoes it on the response. Small JSON bodies are logged in
//! both directions. Request bodies over [`MAX_REQUEST_BODY`] are refused with
//! 413 before any handler runs.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use axum::response::IntoResponse;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::ServerError;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Bodies up to this size are logged verbatim.
const MAX_LOGGED_BODY: usize = 1024;

/// Largest request body buffered for a handler.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

        let (parts, body) = req.into_parts();
        let response = match read_request_body(body).await {
            Ok(req_bytes) => {
                log_body("request", &parts.headers, &req_bytes);
                let mut req = Request::from_parts(parts, Body::from(req_bytes));
                if let Some(value) = header_value.clone() {
                    req.headers_mut().insert(X_TRACE_ID, value);
                }
                next.run(req).await
            }
            Err(e) => e.into_response(),
        };

        let (parts, body) = response.into_parts();
        let res_bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(error = %e, "failed to buffer response body");
                Bytes::new()
            }
        };
        log_body("response", &parts.headers, &res_bytes);
        let mut response = Response::from_parts(parts, Body::from(res_bytes));
        if let Some(value) = header_value {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis() as u64,
            "← response finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Collect at most [`MAX_REQUEST_BODY`] bytes of a request body.
async fn read_request_body(body: Body) -> Result<Bytes, ServerError> {
    match Limited::new(body, MAX_REQUEST_BODY).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(ServerError::PayloadTooLarge {
            limit: MAX_REQUEST_BODY,
        }),
        Err(e) => Err(ServerError::BadRequest(format!("failed to read request body: {e}"))),
    }
}

/// Log a body when it is small JSON.
fn log_body(direction: &str, headers: &header::HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") && bytes.len() < MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            info!("{direction} body: {text}");
        }
    } else if !bytes.is_empty() {
        info!("{direction} body: [skipped: type={content_type}, size={}]", bytes.len());
    }
}
