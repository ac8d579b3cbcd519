//! Publish sink abstraction and the HTTP data-plane implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::error::PublishError;
use crate::fetch::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};

/// One message delivered to the device-facing topic.
#[derive(Debug, Clone)]
pub struct ChunkMessage {
    /// Destination topic.
    pub topic: String,
    /// Quality-of-service level requested from the broker.
    pub qos: u8,
    /// Whether the broker should retain the message for late subscribers.
    pub retain: bool,
    /// Raw payload bytes.
    pub payload: Vec<u8>,
    /// Content type hint forwarded to consumers.
    pub content_type: String,
}

/// Asynchronous message channel toward devices.
///
/// Delivery outcome is not part of the session's success or failure;
/// implementations report errors for logging only. The trait is the seam
/// that lets sessions run against fakes in tests.
#[async_trait]
pub trait PublishSink: Send + Sync {
    /// Delivers one message to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the sink could not accept the message.
    async fn publish(&self, message: ChunkMessage) -> Result<(), PublishError>;
}

/// Publishes messages over the broker's HTTPS data-plane API.
///
/// Messages are POSTed to `{base}/topics/{topic}` with the QoS level and
/// retain flag as query parameters. Topic segments are percent-encoded so a
/// topic like `devices/alpha` maps onto the path unambiguously.
#[derive(Debug, Clone)]
pub struct HttpPublisher {
    client: Client,
    base_url: String,
}

impl HttpPublisher {
    /// Creates a publisher for the given data-plane base URL.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client with static configuration");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn topic_url(&self, topic: &str) -> String {
        let encoded: Vec<String> = topic
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/topics/{}", self.base_url, encoded.join("/"))
    }
}

#[async_trait]
impl PublishSink for HttpPublisher {
    async fn publish(&self, message: ChunkMessage) -> Result<(), PublishError> {
        let url = self.topic_url(&message.topic);
        debug!(
            topic = %message.topic,
            bytes = message.payload.len(),
            "publishing chunk"
        );

        let response = self
            .client
            .post(&url)
            .query(&[
                ("qos", message.qos.to_string()),
                ("retain", message.retain.to_string()),
            ])
            .header(CONTENT_TYPE, message.content_type.as_str())
            .body(message.payload)
            .send()
            .await
            .map_err(|e| PublishError::network(&message.topic, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::status(&message.topic, status.as_u16()));
        }
        Ok(())
    }
}
