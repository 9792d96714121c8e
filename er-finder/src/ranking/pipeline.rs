//! The fetch → join → rank pipeline.
//!
//! [`FeedSnapshot::fetch`] is the only step that touches the network. Both
//! feeds are requested concurrently; if either fails the whole snapshot
//! fails. [`rank_snapshot`] is a pure function of the snapshot, the user
//! location and the fetch epoch.

use chrono::Utc;

use crate::feed::{FeedError, FeedKind, FeedSource, FormatError, xml};
use crate::geo::Coordinate;
use crate::hospital::{BedIndex, Hospital, normalize};

use super::config::RankingConfig;
use super::rank::rank_hospitals;

/// Errors that abort a ranking.
///
/// There is no partial result: any of these means no hospital list.
#[derive(Debug, thiserror::Error)]
pub enum RankError {
    /// Either feed could not be fetched
    #[error("failed to fetch {feed} feed: {source}")]
    Fetch {
        feed: FeedKind,
        #[source]
        source: FeedError,
    },

    /// A feed body lacks the expected envelope
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Raw bodies of both feeds, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub facilities: String,
    pub beds: String,
}

impl FeedSnapshot {
    /// Fetch both feeds concurrently.
    ///
    /// Dropping the returned future cancels both requests.
    pub async fn fetch<S: FeedSource + Sync>(source: &S) -> Result<Self, RankError> {
        let fetch = |feed: FeedKind| async move {
            source
                .fetch(feed)
                .await
                .map_err(|source| RankError::Fetch { feed, source })
        };

        let (facilities, beds) =
            tokio::try_join!(fetch(FeedKind::Facilities), fetch(FeedKind::Beds))?;
        Ok(Self { facilities, beds })
    }
}

/// Rank the hospitals in a snapshot for a user location.
///
/// `fetch_epoch` is used for synthesized ids only.
pub fn rank_snapshot(
    snapshot: &FeedSnapshot,
    user: Coordinate,
    fetch_epoch: i64,
    config: &RankingConfig,
) -> Result<Vec<Hospital>, RankError> {
    let facility_items = xml::extract_items(FeedKind::Facilities, &snapshot.facilities)?;
    let bed_items = xml::extract_items(FeedKind::Beds, &snapshot.beds)?;

    let beds = BedIndex::build(&bed_items);
    let facilities = normalize(&facility_items, user, fetch_epoch, config.normalize_options());

    let hospitals: Vec<Hospital> = facilities
        .into_iter()
        .map(|facility| {
            let status = facility.facility_id.as_deref().and_then(|id| beds.get(id));
            Hospital::assemble(facility, status, &config.departments)
        })
        .collect();

    let normalized = hospitals.len();
    let ranked = rank_hospitals(hospitals);

    tracing::info!(
        facility_records = facility_items.len(),
        normalized,
        bed_records = bed_items.len(),
        indexed = beds.len(),
        ranked = ranked.len(),
        "ranked hospitals"
    );

    Ok(ranked)
}

/// Fetch both feeds and rank them for a user location.
pub async fn rank<S: FeedSource + Sync>(
    source: &S,
    user: Coordinate,
    config: &RankingConfig,
) -> Result<Vec<Hospital>, RankError> {
    let snapshot = FeedSnapshot::fetch(source).await?;
    rank_snapshot(&snapshot, user, Utc::now().timestamp_millis(), config)
}
