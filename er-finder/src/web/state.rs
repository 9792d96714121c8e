//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedFeedSource;
use crate::feed::FeedBackend;
use crate::ranking::RankingConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached feed source (live API or fixtures)
    pub feeds: Arc<CachedFeedSource<FeedBackend>>,

    /// Ranking configuration
    pub config: Arc<RankingConfig>,
}

impl AppState {
    pub fn new(feeds: CachedFeedSource<FeedBackend>, config: RankingConfig) -> Self {
        Self {
            feeds: Arc::new(feeds),
            config: Arc::new(config),
        }
    }
}
