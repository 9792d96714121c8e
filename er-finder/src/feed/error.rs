//! Feed error types.

use super::FeedKind;

/// Longest body excerpt carried in a [`FormatError`].
pub const SNIPPET_CHARS: usize = 500;

/// Errors from fetching a feed body.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Service key rejected
    #[error("unauthorized: check ER_SERVICE_KEY")]
    Unauthorized,

    /// Recorded responses could not be read
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

/// A feed body that does not have the expected envelope.
///
/// `snippet` holds the start of the offending document, for diagnostics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{feed} feed: {reason}")]
pub struct FormatError {
    pub feed: FeedKind,
    pub reason: String,
    pub snippet: String,
}

impl FormatError {
    /// Build an error, truncating `document` to [`SNIPPET_CHARS`] characters.
    pub fn new(feed: FeedKind, reason: impl Into<String>, document: &str) -> Self {
        Self {
            feed,
            reason: reason.into(),
            snippet: document.chars().take(SNIPPET_CHARS).collect(),
        }
    }
}
