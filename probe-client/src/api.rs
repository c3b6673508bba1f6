// Wire types for the Ollama HTTP API.

use serde::{Deserialize, Serialize};

/// Body for `POST /api/generate`. Built fresh per call; the client forces
/// the `stream` flag depending on which operation sends it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            options: None,
        }
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Per-request sampling and runtime parameters. Everything is optional;
/// unset fields are omitted from the payload so the server keeps its own
/// defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_thread: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_gpu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f32>,
}

impl GenerateOptions {
    /// The reduced-context performance set used when probing slow models:
    /// context 2048, 8 threads, temperature 0.7, top_k 40, top_p 0.9.
    pub fn tuned() -> Self {
        Self {
            num_ctx: Some(2048),
            num_thread: Some(8),
            temperature: Some(0.7),
            top_k: Some(40),
            top_p: Some(0.9),
            ..Self::default()
        }
    }
}

/// One record from `/api/generate`. In streaming mode each NDJSON line
/// decodes to one of these; in non-streaming mode the whole body is a
/// single record carrying the full response text.
///
/// `response` stays an `Option` so a record without the field can be told
/// apart from one carrying an empty fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateChunk {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

/// Body for `POST /api/create`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest {
    pub name: String,
    pub modelfile: String,
}

/// Response shape of `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelTag {
    pub name: String,
}
