use crate::routes::{generate, health, info, ollama, v1};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "triton-adapter",
    description = "OpenVINO, OpenAI and Ollama compatible front end for a Triton inference server",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(info::InfoApi::openapi());
    root.merge(health::HealthApi::openapi());
    root.merge(generate::GenerateApi::openapi());
    root.merge(v1::api_docs());
    root.merge(ollama::OllamaApi::openapi());
    root
}
