//! Read-through cache for raw feed bodies.
//!
//! Bed counts change minute to minute, so entries live only briefly. The
//! cache absorbs repeated refreshes from the same users; ranking itself is
//! always recomputed from the cached bodies.
//!
//! One cache wraps one configured source, so the feed kind alone is the
//! key: page and row count are fixed by that source's configuration.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::feed::{FeedError, FeedKind, FeedSource};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            max_capacity: 16,
        }
    }
}

/// A [`FeedSource`] that remembers recent bodies.
///
/// Failed fetches are not cached.
pub struct CachedFeedSource<S> {
    inner: S,
    bodies: MokaCache<FeedKind, Arc<String>>,
}

impl<S> CachedFeedSource<S> {
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let bodies = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, bodies }
    }

    /// Access the wrapped source for requests that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached bodies.
    pub fn entry_count(&self) -> u64 {
        self.bodies.entry_count()
    }

    /// Drop every cached body.
    pub fn invalidate_all(&self) {
        self.bodies.invalidate_all();
    }
}

impl<S: FeedSource + Sync> FeedSource for CachedFeedSource<S> {
    async fn fetch(&self, kind: FeedKind) -> Result<String, FeedError> {
        if let Some(body) = self.bodies.get(&kind).await {
            tracing::debug!(feed = %kind, "feed cache hit");
            return Ok(body.as_ref().clone());
        }

        let body = self.inner.fetch(kind).await?;
        self.bodies.insert(kind, Arc::new(body.clone())).await;
        Ok(body)
    }
}
