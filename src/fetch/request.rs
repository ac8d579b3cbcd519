//! Caller-supplied assistance request parameters.

use serde::Serialize;

/// Assistance categories requested when the caller does not narrow the set.
pub const DEFAULT_ASSISTANCE_TYPES: [u8; 13] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13];

/// Filter parameters forwarded verbatim on every paginated request.
///
/// Immutable for the session's lifetime: every page of the retrieval sends
/// the same categories in its request body.
#[derive(Debug, Clone, Default)]
pub struct AssistanceRequest {
    /// Requested assistance categories; `None` requests all known categories.
    pub types: Option<Vec<u8>>,
}

impl AssistanceRequest {
    /// Returns a request for all known assistance categories.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Returns a request narrowed to the given categories.
    #[must_use]
    pub fn with_types(types: Vec<u8>) -> Self {
        Self { types: Some(types) }
    }

    /// Categories actually sent to the endpoint, falling back to the full
    /// known set.
    #[must_use]
    pub fn effective_types(&self) -> Vec<u8> {
        self.types
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSISTANCE_TYPES.to_vec())
    }

    /// JSON body sent on every page of the session.
    pub(crate) fn body(&self) -> RequestBody {
        RequestBody {
            types: self.effective_types(),
        }
    }
}

/// Wire shape of the request body.
#[derive(Debug, Serialize)]
pub(crate) struct RequestBody {
    types: Vec<u8>,
}
