//! Per-record error types.
//!
//! A skipped record never fails its batch; these exist to be logged.

use crate::feed::FeedKind;

/// Why a single feed record was dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// The `item` element had no child fields
    #[error("record is not an object")]
    NotAnObject,

    /// A bed record cannot be joined without a facility id
    #[error("record has no facility id")]
    MissingFacilityId,
}

/// A record excluded from a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("skipped {feed} record #{index}: {reason}")]
pub struct RecordSkipped {
    pub feed: FeedKind,
    pub index: usize,
    pub reason: SkipReason,
}

impl RecordSkipped {
    /// Log the skip at `warn` level.
    pub fn log(&self) {
        tracing::warn!(
            feed = %self.feed,
            index = self.index,
            reason = %self.reason,
            "skipping record"
        );
    }
}
