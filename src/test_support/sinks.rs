//! Fake publish sinks for exercising dispatch behavior.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::publish::{ChunkMessage, PublishError, PublishSink};

/// Records every published message; optionally reports each delivery as
/// failed to exercise the best-effort publish path.
pub struct RecordingSink {
    messages: Mutex<Vec<ChunkMessage>>,
    fail_deliveries: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail_deliveries: false,
        }
    }

    /// A sink whose every delivery errors after recording the message.
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail_deliveries: true,
        }
    }

    pub fn count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    pub fn messages(&self) -> Vec<ChunkMessage> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Waits until at least `expected` messages were delivered.
    ///
    /// Publishes run on spawned tasks, so tests poll briefly instead of
    /// assuming delivery completed when dispatch returned.
    pub async fn wait_for(&self, expected: usize) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while self.count() < expected {
            assert!(
                tokio::time::Instant::now() < deadline,
                "expected {expected} publishes, saw {} before timeout",
                self.count()
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl PublishSink for RecordingSink {
    async fn publish(&self, message: ChunkMessage) -> Result<(), PublishError> {
        let topic = message.topic.clone();
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(message);
        if self.fail_deliveries {
            return Err(PublishError::status(topic, 500));
        }
        Ok(())
    }
}
