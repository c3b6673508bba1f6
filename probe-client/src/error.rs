use std::time::Duration;
use thiserror::Error;

/// Failure modes for a single request/response exchange.
///
/// No operation retries on its own; callers get exactly one of these and
/// own any retry policy.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport could not deliver the request at all (connection
    /// refused, reset, DNS failure).
    #[error("connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// A deadline expired while waiting for the body, the first byte, or
    /// the next streamed chunk. Carries the time observed before giving up.
    #[error("timed out after {:.2}s", .elapsed.as_secs_f64())]
    Timeout { elapsed: Duration },

    /// The service answered with a non-success status. The body text is
    /// kept verbatim as detail.
    #[error("request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    /// A streamed record was not valid JSON.
    #[error("malformed stream record: {detail}")]
    Protocol { detail: String },

    /// The stream closed before any record carried the completion flag.
    #[error("stream ended without a completion record")]
    IncompleteStream,
}

impl ClientError {
    /// Classify a transport-level reqwest failure, preserving the elapsed
    /// time when the cause was a deadline.
    pub(crate) fn from_transport(err: reqwest::Error, elapsed: Duration) -> Self {
        if err.is_timeout() {
            ClientError::Timeout { elapsed }
        } else {
            ClientError::Connection(err)
        }
    }

}
