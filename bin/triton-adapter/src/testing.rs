//! In-memory upstream and request helpers for handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use triton_client::{ClientError, InferenceRequest, InferenceTransport, Protocol, UpstreamClient};

use crate::config::Config;
use crate::state::AppState;

pub(crate) const MODEL: &str = "tinyllama";

/// Scripted upstream that records every inference call.
pub(crate) struct MockTransport {
    pub live: bool,
    pub ready: bool,
    pub model_ready: bool,
    /// Every probe fails as if the server were down.
    pub unreachable: bool,
    pub reply: Result<String, String>,
    pub calls: Mutex<Vec<InferenceRequest>>,
}

impl MockTransport {
    pub fn serving(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            live: true,
            ready: true,
            model_ready: true,
            unreachable: false,
            reply: Ok(reply.to_owned()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn with_health(live: bool, ready: bool, model_ready: bool) -> Arc<Self> {
        Arc::new(Self {
            live,
            ready,
            model_ready,
            unreachable: false,
            reply: Ok("unused".to_owned()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            live: false,
            ready: false,
            model_ready: false,
            unreachable: true,
            reply: Ok("unused".to_owned()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            live: true,
            ready: true,
            model_ready: true,
            unreachable: false,
            reply: Err(message.to_owned()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<InferenceRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn probe(&self, value: bool) -> Result<bool, ClientError> {
        if self.unreachable {
            Err(ClientError::Unreachable("connection refused".into()))
        } else {
            Ok(value)
        }
    }
}

#[async_trait]
impl InferenceTransport for MockTransport {
    fn protocol(&self) -> Protocol {
        Protocol::Grpc
    }

    fn endpoint(&self) -> &str {
        "http://triton:8002"
    }

    async fn server_live(&self) -> Result<bool, ClientError> {
        self.probe(self.live)
    }

    async fn server_ready(&self) -> Result<bool, ClientError> {
        self.probe(self.ready)
    }

    // A server that is down or not ready never reports its models ready.
    async fn model_ready(&self, _model: &str) -> Result<bool, ClientError> {
        self.probe(self.live && self.ready && self.model_ready)
    }

    async fn infer(&self, _model: &str, request: &InferenceRequest) -> Result<String, ClientError> {
        self.calls.lock().unwrap().push(request.clone());
        self.reply.clone().map_err(ClientError::Inference)
    }
}

pub(crate) fn config() -> Config {
    Config::from_lookup(|key| match key {
        "ADAPTER_ENABLE_SWAGGER" => Some("false".into()),
        _ => None,
    })
}

pub(crate) fn state(mock: Arc<MockTransport>) -> Arc<AppState> {
    Arc::new(AppState {
        config: Arc::new(config()),
        upstream: UpstreamClient::new(mock, MODEL),
    })
}

/// Send one request through the full router and decode the JSON reply.
pub(crate) async fn call(
    state: Arc<AppState>,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = crate::routes::build(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
