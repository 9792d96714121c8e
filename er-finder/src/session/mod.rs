//! Per-user session state.
//!
//! A [`Session`] is built only after the location is known and a complete
//! ranking has succeeded, so a half-finished or cancelled start never
//! leaves a partial list behind.

mod location;

use chrono::{DateTime, Utc};

use crate::feed::FeedSource;
use crate::geo::Coordinate;
use crate::hospital::Hospital;
use crate::ranking::{FeedSnapshot, RankError, RankingConfig, rank_snapshot};

pub use location::{FixedLocation, LocationError, LocationProvider};

/// Errors from starting or driving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Rank(#[from] RankError),

    #[error("unknown hospital: {0}")]
    UnknownHospital(String),
}

impl SessionError {
    /// Whether retrying cannot succeed without user action.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionError::Location(LocationError::PermissionDenied))
    }
}

/// The user location, its ranked hospitals, and the current selection.
#[derive(Debug, Clone)]
pub struct Session {
    location: Coordinate,
    hospitals: Vec<Hospital>,
    selected: Option<String>,
    fetched_at: DateTime<Utc>,
}

impl Session {
    /// Locate the user, fetch both feeds and rank them.
    pub async fn start<L, S>(
        locator: &L,
        feeds: &S,
        config: &RankingConfig,
    ) -> Result<Self, SessionError>
    where
        L: LocationProvider + Sync,
        S: FeedSource + Sync,
    {
        let location = locator.locate().await?;
        tracing::debug!(%location, "user located");

        let snapshot = FeedSnapshot::fetch(feeds).await?;
        let fetched_at = Utc::now();
        let hospitals =
            rank_snapshot(&snapshot, location, fetched_at.timestamp_millis(), config)?;

        Ok(Self {
            location,
            hospitals,
            selected: None,
            fetched_at,
        })
    }

    /// Discard this session and start over.
    pub async fn retry<L, S>(
        self,
        locator: &L,
        feeds: &S,
        config: &RankingConfig,
    ) -> Result<Self, SessionError>
    where
        L: LocationProvider + Sync,
        S: FeedSource + Sync,
    {
        drop(self);
        Self::start(locator, feeds, config).await
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    /// Ranked hospitals, nearest first.
    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    /// When this ranking was computed.
    ///
    /// Feed bodies served from a cache may be slightly older.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Select a hospital by id.
    pub fn select(&mut self, id: &str) -> Result<&Hospital, SessionError> {
        let hospital = self
            .hospitals
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| SessionError::UnknownHospital(id.to_string()))?;
        self.selected = Some(hospital.id.clone());
        Ok(hospital)
    }

    pub fn selected(&self) -> Option<&Hospital> {
        let id = self.selected.as_deref()?;
        self.hospitals.iter().find(|h| h.id == id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
