//! Session orchestration: one retrieval request composed end to end.
//!
//! A session is ephemeral. It is created when a retrieval is invoked, runs
//! the fetcher and dispatcher as a strict producer-consumer pair, and is
//! gone once the outcome is returned. Nothing is persisted. Independent
//! sessions may run concurrently; they share nothing mutable.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::fetch::{AssistanceRequest, FetchError, FetchOutcome, RangeFetcher};
use crate::publish::{ChunkDispatcher, PublishSink};

/// Terminal result of one retrieval session.
///
/// A session produces exactly one of these, exactly once. Transport
/// failures are not outcomes: they propagate as [`FetchError`] so callers
/// can tell an endpoint that answered with an error apart from a request
/// that never got an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SessionOutcome {
    /// The full blob was retrieved and dispatched.
    Complete {
        /// Base64 encoding of the reassembled blob.
        result: String,
    },
    /// The endpoint rejected the request.
    Rejected {
        /// Diagnostic text returned by the endpoint.
        #[serde(rename = "error")]
        message: String,
        /// HTTP status carried along for logging; not serialized.
        #[serde(skip)]
        status: u16,
    },
}

/// Composes the range fetcher, publish sink, and chunk dispatcher into
/// runnable sessions.
///
/// Collaborators are injected once at construction; each [`run`] call
/// creates a fresh dispatcher so session state never leaks between
/// invocations.
///
/// [`run`]: SessionRunner::run
pub struct SessionRunner {
    fetcher: RangeFetcher,
    sink: Arc<dyn PublishSink>,
    topic: String,
}

impl SessionRunner {
    /// Creates a runner delivering chunks to `topic` on the given sink.
    #[must_use]
    pub fn new(fetcher: RangeFetcher, sink: Arc<dyn PublishSink>, topic: impl Into<String>) -> Self {
        Self {
            fetcher,
            sink,
            topic: topic.into(),
        }
    }

    /// Runs one retrieval session to its terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when a request fails at the transport level;
    /// no partial result is returned in that case.
    #[instrument(skip(self, request))]
    pub async fn run(&self, request: &AssistanceRequest) -> Result<SessionOutcome, FetchError> {
        let mut dispatcher = ChunkDispatcher::new(Arc::clone(&self.sink), self.topic.clone());

        match self.fetcher.run(request, &mut dispatcher).await? {
            FetchOutcome::Complete => {
                let result = dispatcher.finish();
                info!(encoded_len = result.len(), "session complete");
                Ok(SessionOutcome::Complete { result })
            }
            FetchOutcome::Rejected { status, message } => {
                info!(status, "session rejected by endpoint");
                Ok(SessionOutcome::Rejected { message, status })
            }
        }
    }
}
