//! `Content-Range` response header parsing.
//!
//! The assistance endpoint reports which byte range a response actually
//! covers and, when it knows it, the total blob size. Either side of the
//! header may be `*`: `bytes */16000` (range unknown) or `bytes 0-1599/*`
//! (size unknown).

use std::sync::LazyLock;

use regex::Regex;

use super::window::FetchWindow;

/// Matches `unit start-end/size` where `start-end` and `size` may each be `*`.
#[allow(clippy::expect_used)]
static CONTENT_RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+) ((\d+)-(\d+)|\*)/(\d+|\*)$").expect("content-range regex is valid") // Static pattern, safe to panic
});

/// Parsed `Content-Range` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRange {
    /// Range unit, normally `bytes`.
    pub unit: String,
    /// First byte offset covered by the response, when reported.
    pub start: Option<u64>,
    /// Last byte offset covered by the response, when reported.
    pub end: Option<u64>,
    /// Total resource size; `None` when the server reported `*` (unknown).
    pub size: Option<u64>,
}

impl ContentRange {
    /// Bytes left on the server past this response's `end`.
    ///
    /// Computable only when both `end` and the total size are reported; any
    /// other shape yields zero so pagination stops rather than continuing
    /// without a reliable total. Callers relying on complete retrieval get
    /// no signal that the blob may have been truncated by this policy.
    #[must_use]
    pub fn bytes_remaining(&self) -> u64 {
        match (self.end, self.size) {
            (Some(end), Some(size)) => size.saturating_sub(end.saturating_add(1)),
            _ => 0,
        }
    }

    /// Returns the request window for the next chunk, when bytes remain.
    #[must_use]
    pub fn next_window(&self, chunk_size: u64) -> Option<FetchWindow> {
        if self.bytes_remaining() == 0 {
            return None;
        }
        self.end
            .map(|end| FetchWindow::following(end, chunk_size))
    }
}

/// Parses a `Content-Range` header value.
///
/// Returns `None` when the value does not match the header grammar or when
/// none of start/end/size carry a value (`bytes */*` reports nothing
/// usable).
#[must_use]
pub fn parse_content_range(input: &str) -> Option<ContentRange> {
    let captures = CONTENT_RANGE_PATTERN.captures(input)?;
    let unit = captures.get(1)?.as_str().to_string();
    let start = captures.get(3).and_then(|m| m.as_str().parse().ok());
    let end = captures.get(4).and_then(|m| m.as_str().parse().ok());
    let size = captures
        .get(5)
        .map(|m| m.as_str())
        .filter(|s| *s != "*")
        .and_then(|s| s.parse().ok());

    let range = ContentRange {
        unit,
        start,
        end,
        size,
    };
    if range.start.is_none() && range.end.is_none() && range.size.is_none() {
        return None;
    }
    Some(range)
}
