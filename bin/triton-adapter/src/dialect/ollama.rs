//! Ollama-style chat. The dialect carries no sampling settings, so those are
//! pinned to fixed values.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;
use triton_client::{InferenceRequest, InferenceResponse};

use crate::error::ServerError;
use crate::prompt::format_prompt;
use crate::schemas::message::ChatMessage;
use crate::schemas::ollama::{ModelDetails, OllamaChatRequest, OllamaChatResponse, OllamaModel};

pub const DEFAULT_NUM_PREDICT: u32 = 512;
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.9;

pub fn parse(req: &OllamaChatRequest) -> Result<InferenceRequest, ServerError> {
    if req.stream.unwrap_or(false) {
        debug!("stream requested; returning a complete response instead");
    }
    let max_tokens = req
        .options
        .as_ref()
        .and_then(|o| o.num_predict)
        .unwrap_or(DEFAULT_NUM_PREDICT);

    super::validate(InferenceRequest {
        prompt: format_prompt(&req.messages),
        max_tokens,
        temperature: TEMPERATURE,
        top_p: TOP_P,
    })
}

pub fn format(resp: InferenceResponse, model: String, now: DateTime<Utc>) -> OllamaChatResponse {
    OllamaChatResponse {
        model,
        created_at: timestamp(now),
        total_duration: u64::try_from(resp.elapsed.as_nanos()).unwrap_or(u64::MAX),
        eval_count: resp.tokens,
        message: ChatMessage::assistant(resp.text),
        done: true,
    }
}

/// The `/api/tags` entry describing the served model.
pub fn model_entry(model: &str, now: DateTime<Utc>) -> OllamaModel {
    OllamaModel {
        name: model.to_owned(),
        model: model.to_owned(),
        modified_at: timestamp(now),
        size: 0,
        digest: String::new(),
        details: ModelDetails {
            format: "triton".into(),
            family: String::new(),
            parameter_size: String::new(),
            quantization_level: String::new(),
        },
    }
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}
