//! KServe v2 REST transport (`/v2/...` JSON endpoints) over reqwest.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{
    max_tokens_value, InferenceTransport, MAX_TOKENS_INPUT, SCALAR_SHAPE, TEMPERATURE_INPUT,
    TEXT_INPUT, TEXT_OUTPUT, TOP_P_INPUT,
};
use crate::error::ClientError;
use crate::types::{InferenceRequest, Protocol};
use triton_proto::Datatype;

pub struct HttpTransport {
    client: Client,
    base: Url,
    endpoint: String,
    send_sampling_params: bool,
}

#[derive(Debug, Serialize)]
struct InferInput {
    name: &'static str,
    shape: [i64; 2],
    datatype: &'static str,
    data: Value,
}

#[derive(Debug, Serialize)]
struct RequestedOutput {
    name: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct InferBody {
    inputs: Vec<InferInput>,
    outputs: Vec<RequestedOutput>,
}

#[derive(Debug, Deserialize)]
struct OutputTensor {
    name: String,
    #[serde(default)]
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct InferReply {
    #[serde(default)]
    outputs: Vec<OutputTensor>,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: String,
}

impl HttpTransport {
    pub fn new(url: &str, send_sampling_params: bool) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidEndpoint {
            url: url.to_owned(),
            reason,
        };
        let base = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
        let client = Client::builder()
            .user_agent(concat!("triton-adapter/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            base,
            endpoint: url.to_owned(),
            send_sampling_params,
        })
    }

    /// Append percent-encoded `segments` to the base URL, keeping its path.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidEndpoint {
                url: self.endpoint.clone(),
                reason: "URL cannot carry a path".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` a health path; 2xx means yes, any other status means no.
    async fn probe(&self, segments: &[&str]) -> Result<bool, ClientError> {
        let url = self.url(segments)?;
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;
        debug!(url = %url, status = resp.status().as_u16(), "upstream probe");
        Ok(resp.status().is_success())
    }

    pub(crate) fn infer_body(&self, request: &InferenceRequest) -> Result<InferBody, ClientError> {
        let mut inputs = vec![
            InferInput {
                name: TEXT_INPUT,
                shape: SCALAR_SHAPE,
                datatype: Datatype::Bytes.as_str(),
                data: Value::from(vec![request.prompt.clone()]),
            },
            InferInput {
                name: MAX_TOKENS_INPUT,
                shape: SCALAR_SHAPE,
                datatype: Datatype::Int32.as_str(),
                data: Value::from(vec![max_tokens_value(request)?]),
            },
        ];
        if self.send_sampling_params {
            inputs.push(InferInput {
                name: TEMPERATURE_INPUT,
                shape: SCALAR_SHAPE,
                datatype: Datatype::Fp32.as_str(),
                data: Value::from(vec![request.temperature as f64]),
            });
            inputs.push(InferInput {
                name: TOP_P_INPUT,
                shape: SCALAR_SHAPE,
                datatype: Datatype::Fp32.as_str(),
                data: Value::from(vec![request.top_p as f64]),
            });
        }
        Ok(InferBody {
            inputs,
            outputs: vec![RequestedOutput { name: TEXT_OUTPUT }],
        })
    }
}

#[async_trait]
impl InferenceTransport for HttpTransport {
    fn protocol(&self) -> Protocol {
        Protocol::Http
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn server_live(&self) -> Result<bool, ClientError> {
        self.probe(&["v2", "health", "live"]).await
    }

    async fn server_ready(&self) -> Result<bool, ClientError> {
        self.probe(&["v2", "health", "ready"]).await
    }

    async fn model_ready(&self, model: &str) -> Result<bool, ClientError> {
        self.probe(&["v2", "models", model, "ready"]).await
    }

    async fn infer(&self, model: &str, request: &InferenceRequest) -> Result<String, ClientError> {
        let resp = self
            .client
            .post(self.url(&["v2", "models", model, "infer"])?)
            .json(&self.infer_body(request)?)
            .send()
            .await
            .map_err(|e| ClientError::Inference(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Inference(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Inference(error_message(status, &body)));
        }

        let reply: InferReply = serde_json::from_slice(&body)
            .map_err(|e| ClientError::Protocol(format!("invalid infer response: {e}")))?;
        decode_text_output(reply)
    }
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorReply>(body) {
        Ok(reply) => reply.error,
        Err(_) if body.is_empty() => format!("upstream returned {status}"),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn decode_text_output(reply: InferReply) -> Result<String, ClientError> {
    let output = reply
        .outputs
        .into_iter()
        .find(|o| o.name == TEXT_OUTPUT)
        .ok_or_else(|| ClientError::Protocol(format!("response has no {TEXT_OUTPUT} output")))?;

    match output.data.into_iter().next() {
        Some(Value::String(text)) => Ok(text),
        Some(other) => Ok(other.to_string()),
        None => Err(ClientError::Protocol(format!("{TEXT_OUTPUT} is empty"))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn request(max_tokens: u32) -> InferenceRequest {
        InferenceRequest {
            prompt: "2+2=".into(),
            max_tokens,
            temperature: 0.5,
            top_p: 0.75,
        }
    }

    #[tokio::test]
    async fn probes_map_status_codes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v2/health/live")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("GET", "/v2/health/ready")
            .with_status(503)
            .create_async()
            .await;
        server
            .mock("GET", "/v2/models/tinyllama/ready")
            .with_status(400)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), false).unwrap();
        assert!(transport.server_live().await.unwrap());
        assert!(!transport.server_ready().await.unwrap());
        assert!(!transport.model_ready("tinyllama").await.unwrap());
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        // Port 9 (discard) is not expected to accept HTTP.
        let transport = HttpTransport::new("http://127.0.0.1:9", false).unwrap();
        assert!(matches!(
            transport.server_live().await,
            Err(ClientError::Unreachable(_))
        ));
    }

    #[tokio::test]
    async fn infer_sends_prompt_and_budget() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/models/tinyllama/infer")
            .match_body(Matcher::PartialJson(json!({
                "inputs": [
                    { "name": "text_input", "shape": [1, 1], "datatype": "BYTES", "data": ["2+2="] },
                    { "name": "max_tokens", "shape": [1, 1], "datatype": "INT32", "data": [5] }
                ],
                "outputs": [ { "name": "text_output" } ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "model_name": "tinyllama",
                    "outputs": [
                        { "name": "text_output", "datatype": "BYTES", "shape": [1, 1], "data": ["4"] }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), false).unwrap();
        let text = transport.infer("tinyllama", &request(5)).await.unwrap();
        assert_eq!(text, "4");
        mock.assert_async().await;
    }

    #[test]
    fn sampling_inputs_only_when_enabled() {
        let plain = HttpTransport::new("http://triton:8001", false).unwrap();
        assert_eq!(plain.infer_body(&request(1)).unwrap().inputs.len(), 2);

        let sampling = HttpTransport::new("http://triton:8001", true).unwrap();
        let body = serde_json::to_value(sampling.infer_body(&request(1)).unwrap()).unwrap();
        assert_eq!(body["inputs"][2]["name"], "temperature");
        assert_eq!(body["inputs"][2]["datatype"], "FP32");
        assert_eq!(body["inputs"][3]["name"], "top_p");
        assert_eq!(body["inputs"][3]["data"][0], 0.75);
    }

    #[tokio::test]
    async fn infer_error_payload_is_passed_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v2/models/tinyllama/infer")
            .with_status(400)
            .with_body(r#"{"error":"unexpected inference input 'foo'"}"#)
            .create_async()
            .await;

        let transport = HttpTransport::new(&server.url(), false).unwrap();
        let err = transport.infer("tinyllama", &request(5)).await.unwrap_err();
        match err {
            ClientError::Inference(msg) => assert_eq!(msg, "unexpected inference input 'foo'"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn urls_keep_base_path_and_escape_model() {
        let root = HttpTransport::new("http://triton:8001", false).unwrap();
        assert_eq!(
            root.url(&["v2", "health", "live"]).unwrap().as_str(),
            "http://triton:8001/v2/health/live"
        );

        let prefixed = HttpTransport::new("http://gateway/triton", false).unwrap();
        assert_eq!(
            prefixed.url(&["v2", "models", "a/b c", "ready"]).unwrap().as_str(),
            "http://gateway/triton/v2/models/a%2Fb%20c/ready"
        );
    }

    #[tokio::test]
    async fn probes_follow_a_path_prefix() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/triton/v2/models/tinyllama/ready")
            .with_status(200)
            .create_async()
            .await;

        let transport = HttpTransport::new(&format!("{}/triton", server.url()), false).unwrap();
        assert!(transport.model_ready("tinyllama").await.unwrap());
        mock.assert_async().await;
    }

    #[test]
    fn missing_output_is_a_protocol_error() {
        let reply = InferReply { outputs: vec![] };
        assert!(matches!(
            decode_text_output(reply),
            Err(ClientError::Protocol(_))
        ));
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, b""),
            "upstream returned 500 Internal Server Error"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, b"boom"), "boom");
    }
}
