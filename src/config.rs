//! Relay configuration resolved once at process start.
//!
//! The service key is the only required input without a default. It is read
//! from the CLI flag or the `AGNSS_SERVICE_KEY` environment variable exactly
//! once, before any session starts, and treated as an opaque bearer
//! credential from then on.

use std::env;

use thiserror::Error;
use url::Url;

/// Environment variable holding the bearer key for the assistance endpoint.
pub const SERVICE_KEY_ENV: &str = "AGNSS_SERVICE_KEY";

/// Default topic chunks are published to.
pub const DEFAULT_TOPIC: &str = "agnss/assistance";

/// Errors raised while assembling the relay configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No service key was supplied via flag or environment.
    #[error("no service key: pass --service-key or set {SERVICE_KEY_ENV}")]
    MissingServiceKey,

    /// A supplied URL did not parse.
    #[error("invalid {role} URL: {url}")]
    InvalidUrl {
        /// Which configured URL was rejected.
        role: &'static str,
        /// The invalid URL string.
        url: String,
    },

    /// Chunk size must be positive.
    #[error("chunk size must be at least 1 byte")]
    ZeroChunkSize,
}

/// Static configuration shared by every session in the process.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Assistance endpoint accepting ranged `POST` requests.
    pub endpoint: String,
    /// Base URL of the publish data plane.
    pub publish_url: String,
    /// Topic chunks are published to.
    pub topic: String,
    /// Bytes requested per chunk.
    pub chunk_size: u64,
    /// Bearer key attached to every assistance request.
    pub service_key: String,
}

impl RelayConfig {
    /// Builds a validated configuration.
    ///
    /// A `None` service key falls back to the `AGNSS_SERVICE_KEY`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a URL does not parse, the chunk size is
    /// zero, or no service key can be resolved.
    pub fn new(
        endpoint: impl Into<String>,
        publish_url: impl Into<String>,
        topic: impl Into<String>,
        chunk_size: u64,
        service_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        Url::parse(&endpoint).map_err(|_| ConfigError::InvalidUrl {
            role: "endpoint",
            url: endpoint.clone(),
        })?;

        let publish_url = publish_url.into();
        Url::parse(&publish_url).map_err(|_| ConfigError::InvalidUrl {
            role: "publish",
            url: publish_url.clone(),
        })?;

        if chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }

        let service_key = service_key
            .or_else(|| env::var(SERVICE_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingServiceKey)?;

        Ok(Self {
            endpoint,
            publish_url,
            topic: topic.into(),
            chunk_size,
            service_key,
        })
    }
}
