//! Per-chunk delivery and whole-blob accumulation.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, warn};

use super::sink::{ChunkMessage, PublishSink};

/// QoS level used for chunk messages. Consumers re-request the whole blob
/// on loss, so at-most-once delivery is sufficient.
const CHUNK_QOS: u8 = 0;

/// Content type hint attached to every chunk message.
const CHUNK_CONTENT_TYPE: &str = "application/octet-stream";

/// Delivers each retrieved chunk to the publish sink and accumulates the
/// base64 encoding of the whole blob.
///
/// Publishing is fire-and-forget: delivery runs on a spawned task and a
/// failure is logged without touching the session outcome. Accumulation is
/// streaming: bytes are encoded in 3-byte groups with the remainder carried
/// into the next chunk, so the finished string equals the encoding of the
/// full blob for any chunk size, not a concatenation of padded per-chunk
/// encodings.
pub struct ChunkDispatcher {
    sink: Arc<dyn PublishSink>,
    topic: String,
    encoded: String,
    carry: Vec<u8>,
    chunks_dispatched: u64,
}

impl ChunkDispatcher {
    /// Creates a dispatcher publishing to `topic` on the given sink.
    #[must_use]
    pub fn new(sink: Arc<dyn PublishSink>, topic: impl Into<String>) -> Self {
        Self {
            sink,
            topic: topic.into(),
            encoded: String::new(),
            carry: Vec::new(),
            chunks_dispatched: 0,
        }
    }

    /// Forwards one retrieved chunk to the sink and appends it to the
    /// session accumulator.
    ///
    /// Must be called in fetch order; windows are requested monotonically,
    /// so fetch order is byte order.
    pub fn dispatch(&mut self, chunk: &[u8]) {
        self.chunks_dispatched += 1;
        debug!(
            topic = %self.topic,
            bytes = chunk.len(),
            chunk = self.chunks_dispatched,
            "dispatching chunk"
        );

        let message = ChunkMessage {
            topic: self.topic.clone(),
            qos: CHUNK_QOS,
            retain: false,
            payload: chunk.to_vec(),
            content_type: CHUNK_CONTENT_TYPE.to_string(),
        };
        let sink = Arc::clone(&self.sink);
        // Delivery is not awaited; the pagination loop moves on immediately.
        tokio::spawn(async move {
            if let Err(error) = sink.publish(message).await {
                warn!(error = %error, "chunk publish failed; continuing session");
            }
        });

        self.carry.extend_from_slice(chunk);
        let complete = self.carry.len() - self.carry.len() % 3;
        BASE64.encode_string(&self.carry[..complete], &mut self.encoded);
        self.carry.drain(..complete);
    }

    /// Number of chunks handed to the sink so far.
    #[must_use]
    pub fn chunks_dispatched(&self) -> u64 {
        self.chunks_dispatched
    }

    /// Flushes the carried remainder and returns the accumulated encoding
    /// of the blob.
    #[must_use]
    pub fn finish(mut self) -> String {
        if !self.carry.is_empty() {
            BASE64.encode_string(&self.carry, &mut self.encoded);
        }
        self.encoded
    }
}
