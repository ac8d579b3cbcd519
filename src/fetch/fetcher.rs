//! Pagination loop driving successive byte-range requests.
//!
//! This is the retrieval state machine: request a window, hand the chunk to
//! the dispatcher, compute the remaining byte count from the response's
//! `Content-Range`, then either advance the window or terminate. Each
//! request is outstanding alone; the next window is derived from the
//! previous response, so no two requests for the same session are ever in
//! flight concurrently.

use tracing::{debug, info, instrument, warn};

use super::client::RangeClient;
use super::content_range::{ContentRange, parse_content_range};
use super::error::FetchError;
use super::request::AssistanceRequest;
use super::window::FetchWindow;
use crate::publish::ChunkDispatcher;

/// Terminal outcome of the pagination loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Every chunk the endpoint reported was retrieved and dispatched.
    Complete,
    /// The endpoint answered with an error status; the body is its
    /// diagnostic text. Nothing was dispatched for that response.
    Rejected {
        /// HTTP status returned by the endpoint.
        status: u16,
        /// Error body decoded as text.
        message: String,
    },
}

/// Drives the chunked retrieval of one assistance blob.
#[derive(Debug)]
pub struct RangeFetcher {
    client: RangeClient,
    chunk_size: u64,
}

impl RangeFetcher {
    /// Creates a fetcher requesting `chunk_size` bytes per window.
    #[must_use]
    pub fn new(client: RangeClient, chunk_size: u64) -> Self {
        Self { client, chunk_size }
    }

    /// Configured chunk size in bytes.
    #[must_use]
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Retrieves the blob chunk by chunk, handing each chunk to
    /// `dispatcher` as it arrives.
    ///
    /// Pagination terminates when the response's `Content-Range` reports no
    /// bytes past the retrieved window, and also when the header is absent,
    /// unparsable, or size-less: continuing without a reliable total would
    /// risk requesting the same bytes forever, so the chunk already received
    /// is delivered and the retrieval ends there.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when a request fails at the transport level.
    /// Transport failures are fatal: no retry, no partial result.
    #[instrument(skip(self, request, dispatcher))]
    pub async fn run(
        &self,
        request: &AssistanceRequest,
        dispatcher: &mut ChunkDispatcher,
    ) -> Result<FetchOutcome, FetchError> {
        let mut window = FetchWindow::first(self.chunk_size);
        let mut requests: u32 = 0;
        let mut total_bytes: u64 = 0;

        loop {
            requests += 1;
            let response = self.client.fetch_range(request, &window).await?;

            if !matches!(response.status, 200 | 206) {
                let message = String::from_utf8_lossy(&response.body).into_owned();
                warn!(
                    status = response.status,
                    %message,
                    "assistance endpoint rejected the request"
                );
                return Ok(FetchOutcome::Rejected {
                    status: response.status,
                    message,
                });
            }

            let content_range = response
                .content_range
                .as_deref()
                .and_then(parse_content_range);
            if content_range.is_none() {
                warn!(
                    status = response.status,
                    header = response.content_range.as_deref().unwrap_or("<absent>"),
                    "no usable Content-Range in response; treating chunk as final"
                );
            }

            total_bytes += response.body.len() as u64;
            dispatcher.dispatch(&response.body);

            let remaining = content_range
                .as_ref()
                .map_or(0, ContentRange::bytes_remaining);
            debug!(remaining, "assistance bytes remaining");

            let Some(next) = content_range
                .as_ref()
                .and_then(|cr| cr.next_window(self.chunk_size))
            else {
                info!(requests, total_bytes, "assistance retrieval complete");
                return Ok(FetchOutcome::Complete);
            };

            // A success response with an empty body but a positive remaining
            // count would request the same window forever; stop instead.
            if response.body.is_empty() {
                warn!(
                    remaining,
                    "empty chunk with bytes still remaining; terminating retrieval"
                );
                return Ok(FetchOutcome::Complete);
            }

            window = next;
        }
    }
}
