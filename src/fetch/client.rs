//! HTTP client wrapper for byte-range requests against the assistance
//! endpoint.
//!
//! Each request is a `POST` carrying the category filter as a JSON body and
//! the requested window as a `Range` header. The client drains the whole
//! response before returning: chunk payload on success statuses, diagnostic
//! text otherwise.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_RANGE, RANGE};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use super::error::FetchError;
use super::request::AssistanceRequest;
use super::window::FetchWindow;

/// Raw result of one byte-range request.
#[derive(Debug)]
pub struct RangeResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw `Content-Range` header value, when the response carried one.
    pub content_range: Option<String>,
    /// Response body: chunk payload on 200/206, diagnostic text otherwise.
    pub body: Vec<u8>,
}

/// HTTP client for ranged assistance requests.
///
/// Created once per process and reused across requests to take advantage of
/// connection pooling. The service key is attached as a bearer credential on
/// every request.
#[derive(Debug, Clone)]
pub struct RangeClient {
    client: Client,
    endpoint: String,
    service_key: String,
}

impl RangeClient {
    /// Creates a client for the given endpoint with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Request timeout: 60 seconds per chunk
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if `endpoint` is not a valid URL.
    pub fn new(endpoint: &str, service_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeouts(
            endpoint,
            service_key,
            CONNECT_TIMEOUT_SECS,
            REQUEST_TIMEOUT_SECS,
        )
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if `endpoint` is not a valid URL.
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(
        endpoint: &str,
        service_key: impl Into<String>,
        connect_timeout_secs: u64,
        request_timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        Url::parse(endpoint).map_err(|_| FetchError::invalid_url(endpoint))?;

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .expect("failed to build HTTP client with static configuration");

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            service_key: service_key.into(),
        })
    }

    /// Endpoint URL this client requests against.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues one byte-range request and drains the response.
    ///
    /// Error *statuses* are not errors here; the caller inspects
    /// [`RangeResponse::status`] to decide between continuation and
    /// rejection.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Timeout`] when the per-chunk deadline expires
    /// and [`FetchError::Network`] for any other transport failure.
    #[instrument(skip(self, request), fields(range = %window.header_value()))]
    pub async fn fetch_range(
        &self,
        request: &AssistanceRequest,
        window: &FetchWindow,
    ) -> Result<RangeResponse, FetchError> {
        debug!("requesting assistance chunk");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.service_key)
            .header(ACCEPT, "application/octet-stream")
            .header(RANGE, window.header_value())
            .json(&request.body())
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status().as_u16();
        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .map(std::string::ToString::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify_transport_error(e))?
            .to_vec();

        debug!(status, bytes = body.len(), "response drained");

        Ok(RangeResponse {
            status,
            content_range,
            body,
        })
    }

    fn classify_transport_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::timeout(&self.endpoint)
        } else {
            FetchError::network(&self.endpoint, error)
        }
    }
}
