//! Error types for the fetch module.

use thiserror::Error;

/// Errors that can occur while requesting assistance data.
///
/// These cover transport-level failures only and are fatal for the session.
/// An error *response* from the endpoint (non-2xx status with a diagnostic
/// body) is not a `FetchError`; it surfaces as a rejected session outcome
/// so callers can tell an endpoint that answered apart from a request that
/// never got an answer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors,
    /// body read failure).
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The per-chunk deadline expired before the response was drained.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The configured endpoint URL is malformed.
    #[error("invalid endpoint URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let error = FetchError::timeout("https://cloud.example/v1/location/agnss");
        let msg = error.to_string();
        assert!(msg.contains("timeout"), "Expected 'timeout' in: {msg}");
        assert!(
            msg.contains("https://cloud.example/v1/location/agnss"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_invalid_url_display() {
        let error = FetchError::invalid_url("not-a-url");
        let msg = error.to_string();
        assert!(msg.contains("invalid endpoint URL"), "got: {msg}");
        assert!(msg.contains("not-a-url"), "Expected URL in: {msg}");
    }
}
