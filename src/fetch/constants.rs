//! Constants for the fetch module (chunk sizing, timeouts).

/// Default chunk size in bytes.
///
/// Chosen small enough that a constrained device consumer can process each
/// published message individually; this bounds peak buffering at the
/// consumer, not at the fetcher.
pub const DEFAULT_CHUNK_SIZE: u64 = 1600;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default per-chunk request timeout (60 seconds).
///
/// A hung upstream response fails the session instead of hanging it
/// indefinitely.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
