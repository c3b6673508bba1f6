// Streaming response consumption.
//
// The generate endpoint streams newline-delimited JSON records. The
// accumulator here owns everything between raw transport bytes and the
// reconstructed response text, so the logic is testable without an HTTP
// server in the loop.

use std::io::Write;
use std::time::Duration;

use crate::api::GenerateChunk;
use crate::error::ClientError;

/// Destination for fragments as they arrive. Display is a side effect;
/// the accumulated text returned at the end is authoritative.
pub trait TokenSink {
    fn fragment(&mut self, fragment: &str);
}

/// Prints each fragment immediately, flushing so partial lines show up
/// while the model is still generating.
pub struct StdoutSink;

impl TokenSink for StdoutSink {
    fn fragment(&mut self, fragment: &str) {
        print!("{}", fragment);
        let _ = std::io::stdout().flush();
    }
}

/// Discards fragments. Useful when only the final text and timings matter.
pub struct NullSink;

impl TokenSink for NullSink {
    fn fragment(&mut self, _fragment: &str) {}
}

/// Result of a completed streaming generation.
#[derive(Debug, Clone)]
pub struct StreamOutcome {
    /// All fragments concatenated in arrival order.
    pub text: String,
    /// Wall-clock time from request start to the completion record,
    /// including connection setup and first-byte latency.
    pub elapsed: Duration,
    /// Number of records that carried a fragment field. This counts
    /// received records, not model tokens - the chunk format does not
    /// expose token boundaries, so the rate below is an approximation.
    pub fragments: usize,
}

/// Floor for the elapsed time used in rate computation, so a completion
/// inside the clock's resolution still yields a finite rate.
pub const MIN_RATE_ELAPSED: Duration = Duration::from_millis(1);

impl StreamOutcome {
    /// Fragments per second of wall-clock time, elapsed clamped to
    /// [`MIN_RATE_ELAPSED`].
    pub fn tokens_per_second(&self) -> f64 {
        let elapsed = self.elapsed.max(MIN_RATE_ELAPSED);
        self.fragments as f64 / elapsed.as_secs_f64()
    }
}

/// Reassembles NDJSON records from transport chunks and accumulates the
/// generated text.
///
/// Transport chunks split lines at arbitrary byte offsets, so bytes are
/// buffered until a full line is available. Records after the first
/// `done = true` are ignored.
pub struct StreamAccumulator {
    buffer: Vec<u8>,
    text: String,
    fragments: usize,
    done: bool,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            text: String::new(),
            fragments: 0,
            done: false,
        }
    }

    /// True once a completion record has been processed. The caller should
    /// stop reading the transport at that point, even if more bytes are
    /// buffered.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one transport chunk, draining every complete line it finishes.
    pub fn push(&mut self, bytes: &[u8], sink: &mut dyn TokenSink) -> Result<(), ClientError> {
        self.buffer.extend_from_slice(bytes);

        while !self.done {
            let Some(line) = self.take_line() else {
                break;
            };
            self.process_line(&line, sink)?;
        }

        Ok(())
    }

    /// Close out the stream. Any buffered bytes without a trailing newline
    /// are processed as a final record first. Failing with
    /// `IncompleteStream` discards the partial text.
    pub fn finish(
        mut self,
        elapsed: Duration,
        sink: &mut dyn TokenSink,
    ) -> Result<StreamOutcome, ClientError> {
        if !self.done && !self.buffer.is_empty() {
            let tail = std::mem::take(&mut self.buffer);
            // A tail that fails to parse is truncation, not malformation -
            // the transport closed mid-record.
            if self.process_line(&tail, sink).is_err() {
                return Err(ClientError::IncompleteStream);
            }
        }

        if !self.done {
            return Err(ClientError::IncompleteStream);
        }

        Ok(StreamOutcome {
            text: self.text,
            elapsed,
            fragments: self.fragments,
        })
    }

    fn take_line(&mut self) -> Option<Vec<u8>> {
        let pos = self.buffer.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }

    fn process_line(&mut self, line: &[u8], sink: &mut dyn TokenSink) -> Result<(), ClientError> {
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(());
        }

        let chunk: GenerateChunk =
            serde_json::from_slice(line).map_err(|e| ClientError::Protocol {
                detail: e.to_string(),
            })?;

        // Every record carrying a fragment field counts, empty terminal
        // fragments included.
        if let Some(fragment) = chunk.response {
            sink.fragment(&fragment);
            self.text.push_str(&fragment);
            self.fragments += 1;
        }

        if chunk.done {
            self.done = true;
        }

        Ok(())
    }
}

impl Default for StreamAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
