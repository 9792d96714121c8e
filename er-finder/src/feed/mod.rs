//! Public emergency-medical data feeds.
//!
//! Two independent feeds are published under the same service base:
//! - the facility list (`getEgytListInfoInqire`): one item per emergency
//!   institution, with name, address, classification and coordinates
//! - real-time bed availability (`getEmrrmRltmUsefulSckbdInfoInqire`): one
//!   item per institution, with ICU bed counts and the ER-active flag
//!
//! Both answer with the same XML envelope, `response/body/items/item`,
//! where `item` is a list when there are several results and a bare element
//! when there is exactly one. [`xml::extract_items`] hides that quirk.

mod client;
mod error;
mod fixture;
pub mod xml;

use std::fmt;
use std::future::Future;

pub use client::{FeedClient, FeedConfig};
pub use error::{FeedError, FormatError};
pub use fixture::FixtureFeeds;

/// Which of the two upstream feeds a request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// Emergency facility list
    Facilities,
    /// Real-time bed availability
    Beds,
}

impl FeedKind {
    /// Operation path appended to the service base URL.
    pub fn path(self) -> &'static str {
        match self {
            FeedKind::Facilities => "getEgytListInfoInqire",
            FeedKind::Beds => "getEmrrmRltmUsefulSckbdInfoInqire",
        }
    }

    /// File name used for recorded responses.
    pub fn fixture_file(self) -> &'static str {
        match self {
            FeedKind::Facilities => "facilities.xml",
            FeedKind::Beds => "beds.xml",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Facilities => f.write_str("facility"),
            FeedKind::Beds => f.write_str("bed"),
        }
    }
}

/// Source of raw feed bodies.
///
/// This abstraction lets the ranking pipeline run against the live API,
/// recorded fixtures, or a cache in front of either.
pub trait FeedSource {
    /// Fetch the raw XML body of a feed.
    fn fetch(&self, kind: FeedKind) -> impl Future<Output = Result<String, FeedError>> + Send;
}

/// The feed source selected at start-up.
#[derive(Debug, Clone)]
pub enum FeedBackend {
    Live(FeedClient),
    Fixture(FixtureFeeds),
}

impl FeedSource for FeedBackend {
    async fn fetch(&self, kind: FeedKind) -> Result<String, FeedError> {
        match self {
            FeedBackend::Live(client) => client.fetch(kind).await,
            FeedBackend::Fixture(fixtures) => fixtures.fetch(kind).await,
        }
    }
}
