//! KServe v2 gRPC transport over a lazily connected tonic channel.

use std::collections::HashMap;

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;
use tracing::debug;

use super::{
    max_tokens_value, InferenceTransport, MAX_TOKENS_INPUT, SCALAR_SHAPE, TEMPERATURE_INPUT,
    TEXT_INPUT, TEXT_OUTPUT, TOP_P_INPUT,
};
use crate::error::ClientError;
use crate::types::{InferenceRequest, Protocol};
use triton_proto::inference::model_infer_request::{InferInputTensor, InferRequestedOutputTensor};
use triton_proto::tensor::deserialize_bytes_tensor;
use triton_proto::{
    Datatype, GrpcInferenceServiceClient, InferTensorContents, ModelInferRequest,
    ModelInferResponse, ModelReadyRequest, ServerLiveRequest, ServerReadyRequest,
};

pub struct GrpcTransport {
    client: GrpcInferenceServiceClient<Channel>,
    endpoint: String,
    send_sampling_params: bool,
}

impl GrpcTransport {
    /// Build a client whose channel connects on first use.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect_lazy(url: &str, send_sampling_params: bool) -> Result<Self, ClientError> {
        let channel = Endpoint::from_shared(url.to_owned())
            .map_err(|e| ClientError::InvalidEndpoint {
                url: url.to_owned(),
                reason: e.to_string(),
            })?
            .connect_lazy();

        Ok(Self {
            client: GrpcInferenceServiceClient::new(channel),
            endpoint: url.to_owned(),
            send_sampling_params,
        })
    }

    // Generated client methods take `&mut self`; channels are cheap to clone.
    fn client(&self) -> GrpcInferenceServiceClient<Channel> {
        self.client.clone()
    }
}

#[async_trait]
impl InferenceTransport for GrpcTransport {
    fn protocol(&self) -> Protocol {
        Protocol::Grpc
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn server_live(&self) -> Result<bool, ClientError> {
        let reply = self
            .client()
            .server_live(ServerLiveRequest {})
            .await
            .map_err(probe_error)?;
        Ok(reply.into_inner().live)
    }

    async fn server_ready(&self) -> Result<bool, ClientError> {
        let reply = self
            .client()
            .server_ready(ServerReadyRequest {})
            .await
            .map_err(probe_error)?;
        Ok(reply.into_inner().ready)
    }

    async fn model_ready(&self, model: &str) -> Result<bool, ClientError> {
        let reply = self
            .client()
            .model_ready(ModelReadyRequest {
                name: model.to_owned(),
                version: String::new(),
            })
            .await
            .map_err(probe_error)?;
        Ok(reply.into_inner().ready)
    }

    async fn infer(&self, model: &str, request: &InferenceRequest) -> Result<String, ClientError> {
        let message = build_infer_request(model, request, self.send_sampling_params)?;
        let reply = self
            .client()
            .model_infer(message)
            .await
            .map_err(|status| ClientError::Inference(status.message().to_owned()))?;
        let reply = reply.into_inner();
        debug!(outputs = reply.outputs.len(), raw = reply.raw_output_contents.len(), "ModelInfer reply");
        decode_text_output(&reply)
    }
}

/// Health-probe failures: any status means the server could not answer.
fn probe_error(status: Status) -> ClientError {
    ClientError::Unreachable(format!("{:?}: {}", status.code(), status.message()))
}

fn scalar_input(name: &str, datatype: Datatype, contents: InferTensorContents) -> InferInputTensor {
    InferInputTensor {
        name: name.to_owned(),
        datatype: datatype.as_str().to_owned(),
        shape: SCALAR_SHAPE.to_vec(),
        parameters: HashMap::new(),
        contents: Some(contents),
    }
}

pub(crate) fn build_infer_request(
    model: &str,
    request: &InferenceRequest,
    send_sampling_params: bool,
) -> Result<ModelInferRequest, ClientError> {
    let mut inputs = vec![
        scalar_input(
            TEXT_INPUT,
            Datatype::Bytes,
            InferTensorContents {
                bytes_contents: vec![request.prompt.as_bytes().to_vec()],
                ..Default::default()
            },
        ),
        scalar_input(
            MAX_TOKENS_INPUT,
            Datatype::Int32,
            InferTensorContents {
                int_contents: vec![max_tokens_value(request)?],
                ..Default::default()
            },
        ),
    ];

    if send_sampling_params {
        for (name, value) in [
            (TEMPERATURE_INPUT, request.temperature),
            (TOP_P_INPUT, request.top_p),
        ] {
            inputs.push(scalar_input(
                name,
                Datatype::Fp32,
                InferTensorContents {
                    fp32_contents: vec![value],
                    ..Default::default()
                },
            ));
        }
    }

    Ok(ModelInferRequest {
        model_name: model.to_owned(),
        inputs,
        outputs: vec![InferRequestedOutputTensor {
            name: TEXT_OUTPUT.to_owned(),
            parameters: HashMap::new(),
        }],
        ..Default::default()
    })
}

/// First element of `text_output`, read from raw contents when present.
pub(crate) fn decode_text_output(reply: &ModelInferResponse) -> Result<String, ClientError> {
    let index = reply
        .outputs
        .iter()
        .position(|o| o.name == TEXT_OUTPUT)
        .ok_or_else(|| ClientError::Protocol(format!("response has no {TEXT_OUTPUT} output")))?;

    let element = if let Some(raw) = reply.raw_output_contents.get(index) {
        deserialize_bytes_tensor(raw)?.into_iter().next()
    } else {
        reply.outputs[index]
            .contents
            .as_ref()
            .and_then(|c| c.bytes_contents.first().cloned())
    };

    let element =
        element.ok_or_else(|| ClientError::Protocol(format!("{TEXT_OUTPUT} is empty")))?;
    Ok(String::from_utf8_lossy(&element).into_owned())
}

#[cfg(test)]
mod test {
    use super::*;
    use triton_proto::inference::model_infer_response::InferOutputTensor;
    use triton_proto::tensor::serialize_bytes_tensor;

    fn request() -> InferenceRequest {
        InferenceRequest {
            prompt: "2+2=".into(),
            max_tokens: 10,
            temperature: 0.7,
            top_p: 0.9,
        }
    }

    fn output(name: &str, contents: Option<InferTensorContents>) -> InferOutputTensor {
        InferOutputTensor {
            name: name.into(),
            datatype: "BYTES".into(),
            shape: vec![1, 1],
            parameters: HashMap::new(),
            contents,
        }
    }

    #[test]
    fn request_carries_prompt_and_budget() {
        let msg = build_infer_request("tinyllama", &request(), false).unwrap();
        assert_eq!(msg.model_name, "tinyllama");
        assert_eq!(msg.inputs.len(), 2);

        let text = &msg.inputs[0];
        assert_eq!(text.name, "text_input");
        assert_eq!(text.datatype, "BYTES");
        assert_eq!(text.shape, vec![1, 1]);
        assert_eq!(
            text.contents.as_ref().unwrap().bytes_contents,
            vec![b"2+2=".to_vec()]
        );

        let budget = &msg.inputs[1];
        assert_eq!(budget.name, "max_tokens");
        assert_eq!(budget.datatype, "INT32");
        assert_eq!(budget.contents.as_ref().unwrap().int_contents, vec![10]);

        assert_eq!(msg.outputs.len(), 1);
        assert_eq!(msg.outputs[0].name, "text_output");
        assert!(msg.raw_input_contents.is_empty());
    }

    #[test]
    fn sampling_params_are_optional_inputs() {
        let msg = build_infer_request("llama3_2_3b", &request(), true).unwrap();
        let names: Vec<_> = msg.inputs.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["text_input", "max_tokens", "temperature", "top_p"]);
        assert_eq!(msg.inputs[3].contents.as_ref().unwrap().fp32_contents, vec![0.9]);
    }

    #[test]
    fn decodes_raw_output_contents() {
        let reply = ModelInferResponse {
            outputs: vec![output("text_output", None)],
            raw_output_contents: vec![serialize_bytes_tensor(["4"])],
            ..Default::default()
        };
        assert_eq!(decode_text_output(&reply).unwrap(), "4");
    }

    #[test]
    fn decodes_typed_contents_when_raw_is_absent() {
        let reply = ModelInferResponse {
            outputs: vec![
                output("other", None),
                output(
                    "text_output",
                    Some(InferTensorContents {
                        bytes_contents: vec![b"hello world".to_vec()],
                        ..Default::default()
                    }),
                ),
            ],
            ..Default::default()
        };
        assert_eq!(decode_text_output(&reply).unwrap(), "hello world");
    }

    #[test]
    fn missing_output_is_a_protocol_error() {
        let reply = ModelInferResponse::default();
        assert!(matches!(
            decode_text_output(&reply),
            Err(ClientError::Protocol(_))
        ));
    }

    #[test]
    fn corrupt_raw_output_is_a_protocol_error() {
        let reply = ModelInferResponse {
            outputs: vec![output("text_output", None)],
            raw_output_contents: vec![vec![9, 0]],
            ..Default::default()
        };
        assert!(matches!(
            decode_text_output(&reply),
            Err(ClientError::Protocol(_))
        ));
    }
}
