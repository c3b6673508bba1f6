// HTTP client for a locally running Ollama server.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::api::{CreateRequest, GenerateChunk, GenerateRequest, TagsResponse};
use crate::error::ClientError;
use crate::modelfile::Modelfile;
use crate::stream::{StreamAccumulator, StreamOutcome, TokenSink};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Result of a non-streaming generation.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub text: String,
    pub elapsed: Duration,
}

/// Anything that can service a blocking generation request. The
/// comparison runner takes this seam so it can be driven by a scripted
/// fake in tests.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, ClientError>;
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// `timeout` bounds the whole exchange for non-streaming calls, and
    /// the wait for the first byte and each subsequent read for streaming
    /// calls. A long generation is fine as long as chunks keep arriving.
    pub fn with_config(base_url: &str, timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a generation request and consume the response incrementally.
    ///
    /// Each fragment goes to `sink` as it arrives; the reconstructed text
    /// comes back in the outcome together with the wall-clock elapsed time
    /// (connection setup included) and the fragment count. Reading stops at
    /// the first completion record even if the transport has more buffered.
    /// On failure no partial text is returned.
    pub async fn stream_generate(
        &self,
        request: &GenerateRequest,
        sink: &mut dyn TokenSink,
    ) -> Result<StreamOutcome, ClientError> {
        let mut request = request.clone();
        request.stream = true;

        let url = format!("{}/api/generate", self.base_url);
        debug!(model = %request.model, "starting streaming generation");
        let start = Instant::now();

        let response = timeout(self.timeout, self.http.post(&url).json(&request).send())
            .await
            .map_err(|_| ClientError::Timeout {
                elapsed: start.elapsed(),
            })?
            .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;
            warn!(status = status.as_u16(), "generate rejected");
            return Err(ClientError::Request {
                status: status.as_u16(),
                body,
            });
        }

        let mut body = Box::pin(response.bytes_stream());
        let mut accumulator = StreamAccumulator::new();

        while !accumulator.is_done() {
            let next = timeout(self.timeout, body.next())
                .await
                .map_err(|_| ClientError::Timeout {
                    elapsed: start.elapsed(),
                })?;

            match next {
                Some(Ok(bytes)) => accumulator.push(&bytes, sink)?,
                Some(Err(e)) => return Err(ClientError::from_transport(e, start.elapsed())),
                None => break,
            }
        }

        let outcome = accumulator.finish(start.elapsed(), sink)?;
        debug!(
            fragments = outcome.fragments,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "stream complete"
        );
        Ok(outcome)
    }

    /// Send a generation request and wait for the full body.
    ///
    /// A body without a `response` field decodes to an empty string rather
    /// than an error.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, ClientError> {
        let mut request = request.clone();
        request.stream = false;

        let url = format!("{}/api/generate", self.base_url);
        debug!(model = %request.model, "sending generation request");
        let start = Instant::now();

        let response = self
            .http
            .post(&url)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;
            warn!(status = status.as_u16(), "generate rejected");
            return Err(ClientError::Request {
                status: status.as_u16(),
                body,
            });
        }

        let chunk: GenerateChunk = response
            .json()
            .await
            .map_err(|e| Self::classify_decode(e, start.elapsed()))?;

        Ok(GenerateOutcome {
            text: chunk.response.unwrap_or_default(),
            elapsed: start.elapsed(),
        })
    }

    /// Register a derived model built from a Modelfile. Status 200 is the
    /// only success signal the endpoint gives.
    pub async fn create_model(
        &self,
        name: &str,
        modelfile: &Modelfile,
    ) -> Result<(), ClientError> {
        let url = format!("{}/api/create", self.base_url);
        let payload = CreateRequest {
            name: name.to_string(),
            modelfile: modelfile.render(),
        };

        debug!(name, base = modelfile.base(), "creating model");
        let start = Instant::now();

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;
            return Err(ClientError::Request {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    /// Names of every model the server has registered.
    pub async fn list_models(&self) -> Result<Vec<String>, ClientError> {
        let url = format!("{}/api/tags", self.base_url);
        let start = Instant::now();

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;
            return Err(ClientError::Request {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| Self::classify_decode(e, start.elapsed()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Exact-name membership check over the registered models.
    pub async fn has_model(&self, name: &str) -> Result<bool, ClientError> {
        let models = self.list_models().await?;
        Ok(models.iter().any(|m| m == name))
    }

    /// Probe whether the service is reachable and answering.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = format!("{}/api/health", self.base_url);
        let start = Instant::now();

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ClientError::from_transport(e, start.elapsed()))?;
            return Err(ClientError::Request {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    fn classify_decode(err: reqwest::Error, elapsed: Duration) -> ClientError {
        if err.is_decode() {
            ClientError::Protocol {
                detail: err.to_string(),
            }
        } else {
            ClientError::from_transport(err, elapsed)
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, ClientError> {
        OllamaClient::generate(self, request).await
    }
}
