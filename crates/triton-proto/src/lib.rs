//! KServe v2 inference protocol for Triton, as consumed by the adapter.
//!
//! The message and client types are generated at build time from
//! `proto/grpc_service.proto`. The [`tensor`] module holds the helpers needed
//! to move `BYTES` tensors through `raw_*_contents`.

pub mod inference {
    tonic::include_proto!("inference");
}

pub mod tensor;

pub use inference::grpc_inference_service_client::GrpcInferenceServiceClient;
pub use inference::{
    InferTensorContents, ModelInferRequest, ModelInferResponse, ModelReadyRequest,
    ModelReadyResponse, ServerLiveRequest, ServerLiveResponse, ServerReadyRequest,
    ServerReadyResponse,
};
pub use tensor::{Datatype, TensorError};
