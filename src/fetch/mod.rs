//! Chunked byte-range retrieval of assistance blobs.
//!
//! The assistance endpoint serves blobs that are too large (or of unknown
//! size) to fetch in one request. This module paginates through the blob
//! with HTTP `Range` requests, one outstanding request at a time, parsing
//! each response's `Content-Range` header to decide whether more bytes
//! remain.
//!
//! # Features
//!
//! - Explicit [`FetchWindow`] state instead of recursive continuations
//! - `Content-Range` parsing with unknown (`*`) range and size support
//! - Conservative termination when the remaining byte count cannot be
//!   computed from the response headers
//! - Structured error types distinguishing transport failures from
//!   endpoint rejections
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use agnss_relay::{AssistanceRequest, HttpPublisher, RangeClient, RangeFetcher, SessionRunner};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RangeClient::new("https://cloud.example/v1/location/agnss", "service-key")?;
//! let fetcher = RangeFetcher::new(client, 1600);
//! let sink = Arc::new(HttpPublisher::new("https://data.example"));
//! let runner = SessionRunner::new(fetcher, sink, "agnss/assistance");
//! let outcome = runner.run(&AssistanceRequest::all()).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod content_range;
mod error;
mod fetcher;
mod request;
mod window;

pub use client::{RangeClient, RangeResponse};
pub use constants::{CONNECT_TIMEOUT_SECS, DEFAULT_CHUNK_SIZE, REQUEST_TIMEOUT_SECS};
pub use content_range::{ContentRange, parse_content_range};
pub use error::FetchError;
pub use fetcher::{FetchOutcome, RangeFetcher};
pub use request::{AssistanceRequest, DEFAULT_ASSISTANCE_TYPES};
pub use window::FetchWindow;
