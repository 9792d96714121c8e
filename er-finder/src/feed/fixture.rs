//! Recorded feed responses for development without a service key.
//!
//! Loads `facilities.xml` and `beds.xml` from a directory and serves them
//! as if they were live API responses.

use std::path::Path;
use std::sync::Arc;

use super::error::FeedError;
use super::{FeedKind, FeedSource};

/// Feed source that serves fixed bodies.
#[derive(Debug, Clone)]
pub struct FixtureFeeds {
    facilities: Arc<str>,
    beds: Arc<str>,
}

impl FixtureFeeds {
    /// Load both feeds from a directory.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, FeedError> {
        let data_dir = data_dir.as_ref();

        let read = |kind: FeedKind| -> Result<Arc<str>, FeedError> {
            let path = data_dir.join(kind.fixture_file());
            std::fs::read_to_string(&path)
                .map(Arc::from)
                .map_err(|e| FeedError::Fixture {
                    message: format!("failed to read {}: {}", path.display(), e),
                })
        };

        Ok(Self {
            facilities: read(FeedKind::Facilities)?,
            beds: read(FeedKind::Beds)?,
        })
    }

    /// Serve the given bodies.
    pub fn from_bodies(facilities: impl Into<Arc<str>>, beds: impl Into<Arc<str>>) -> Self {
        Self {
            facilities: facilities.into(),
            beds: beds.into(),
        }
    }

    /// The body served for a feed.
    pub fn body(&self, kind: FeedKind) -> &str {
        match kind {
            FeedKind::Facilities => &self.facilities,
            FeedKind::Beds => &self.beds,
        }
    }
}

impl FeedSource for FixtureFeeds {
    async fn fetch(&self, kind: FeedKind) -> Result<String, FeedError> {
        Ok(self.body(kind).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/fixtures");

    #[tokio::test]
    async fn load_bundled_fixtures() {
        let feeds = FixtureFeeds::load(FIXTURE_DIR).unwrap();

        let facilities = feeds.fetch(FeedKind::Facilities).await.unwrap();
        let beds = feeds.fetch(FeedKind::Beds).await.unwrap();

        assert!(facilities.contains("<dutyName>"));
        assert!(beds.contains("<hvicc>"));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("facilities.xml"), "<f/>").unwrap();
        std::fs::write(dir.path().join("beds.xml"), "<b/>").unwrap();

        let feeds = FixtureFeeds::load(dir.path()).unwrap();
        assert_eq!(feeds.body(FeedKind::Facilities), "<f/>");
        assert_eq!(feeds.body(FeedKind::Beds), "<b/>");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("facilities.xml"), "<f/>").unwrap();

        let err = FixtureFeeds::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("beds.xml"));
    }
}
