//! Error types for the publish module.

use thiserror::Error;

/// Errors raised by publish sinks.
///
/// The dispatcher logs these and moves on; chunk delivery is best-effort
/// and independent of blob reassembly.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Network-level error reaching the data plane.
    #[error("network error publishing to {topic}: {source}")]
    Network {
        /// Destination topic.
        topic: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The data plane refused the message.
    #[error("publish to {topic} refused with HTTP {status}")]
    Status {
        /// Destination topic.
        topic: String,
        /// The HTTP status code returned.
        status: u16,
    },
}

impl PublishError {
    /// Creates a network error from a reqwest error.
    pub fn network(topic: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            topic: topic.into(),
            source,
        }
    }

    /// Creates a refused-status error.
    pub fn status(topic: impl Into<String>, status: u16) -> Self {
        Self::Status {
            topic: topic.into(),
            status,
        }
    }
}
