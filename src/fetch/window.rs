//! Byte-range request windows.

/// Byte offsets requested from the assistance endpoint in a single call.
///
/// Windows advance monotonically: the next window starts at the byte after
/// the end reported by the previous response, so chunks arrive in byte
/// order and the accumulated blob needs no reordering. The server may
/// truncate the final window when fewer bytes remain than were requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    start: u64,
    end: u64,
}

impl FetchWindow {
    /// Returns the initial window for a session: bytes `0..=chunk_size - 1`.
    #[must_use]
    pub fn first(chunk_size: u64) -> Self {
        Self {
            start: 0,
            end: chunk_size.saturating_sub(1),
        }
    }

    /// Returns the window immediately following a response whose last byte
    /// offset was `reported_end`.
    #[must_use]
    pub fn following(reported_end: u64, chunk_size: u64) -> Self {
        let start = reported_end.saturating_add(1);
        Self {
            start,
            end: start.saturating_add(chunk_size.saturating_sub(1)),
        }
    }

    /// First byte offset requested (inclusive).
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Last byte offset requested (inclusive).
    #[must_use]
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Renders the window as an HTTP `Range` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}
