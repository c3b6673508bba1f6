// probe-client: streaming-aware HTTP client for a local Ollama server

pub mod api;
pub mod client;
pub mod error;
pub mod modelfile;
pub mod stream;

// Re-export main types
pub use api::{GenerateChunk, GenerateOptions, GenerateRequest};
pub use client::{
    DEFAULT_BASE_URL,
    DEFAULT_TIMEOUT,
    GenerateOutcome,
    Generator,
    OllamaClient,
};
pub use error::ClientError;
pub use modelfile::Modelfile;
pub use stream::{NullSink, StdoutSink, StreamAccumulator, StreamOutcome, TokenSink};
