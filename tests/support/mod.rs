//! Shared helpers for integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::net::TcpListener;
use std::panic::Location;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

use agnss_relay::{ChunkMessage, PublishError, PublishSink};

#[must_use]
pub fn socket_tests_required() -> bool {
    std::env::var("AGNSS_RELAY_REQUIRE_SOCKET_TESTS")
        .ok()
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
}

#[track_caller]
#[must_use]
pub fn should_skip_socket_bound_test() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }

    let location = Location::caller();
    let message = format!(
        "[socket-bound-test] cannot bind localhost socket at {}:{}; wiremock-based test cannot run in this environment",
        location.file(),
        location.line()
    );
    if socket_tests_required() {
        panic!("{message}. Set AGNSS_RELAY_REQUIRE_SOCKET_TESTS=0 to allow local skip behavior.");
    }

    eprintln!(
        "{message}. Skipping test. Set AGNSS_RELAY_REQUIRE_SOCKET_TESTS=1 to fail-fast instead."
    );
    true
}

pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if should_skip_socket_bound_test() {
        None
    } else {
        Some(MockServer::start().await)
    }
}

/// Simulated byte-range server over an in-memory blob.
///
/// Answers each request with the slice named by its `Range` header, clamped
/// to the blob's final byte, and a matching `Content-Range` header.
pub struct AssistanceResponder {
    blob: Vec<u8>,
}

impl AssistanceResponder {
    pub fn new(blob: Vec<u8>) -> Self {
        Self { blob }
    }
}

impl Respond for AssistanceResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let requested = request
            .headers
            .get("range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_range_header);
        let Some((start, requested_end)) = requested else {
            return ResponseTemplate::new(416);
        };

        let size = self.blob.len() as u64;
        if start >= size {
            return ResponseTemplate::new(416);
        }
        let end = requested_end.min(size - 1);
        let body =
            self.blob[usize::try_from(start).unwrap()..=usize::try_from(end).unwrap()].to_vec();

        ResponseTemplate::new(206)
            .insert_header("Content-Range", format!("bytes {start}-{end}/{size}"))
            .set_body_bytes(body)
    }
}

fn parse_range_header(value: &str) -> Option<(u64, u64)> {
    let spec = value.strip_prefix("bytes=")?;
    let (start, end) = spec.split_once('-')?;
    Some((start.parse().ok()?, end.parse().ok()?))
}

/// Deterministic non-repeating test blob.
pub fn test_blob(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

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

    /// Waits until at least `expected` messages were delivered. Publishes
    /// run on spawned tasks, so tests poll briefly instead of assuming
    /// delivery finished when dispatch returned.
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
