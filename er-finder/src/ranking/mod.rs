//! Fetching, joining and ranking hospitals for a user location.

mod config;
mod pipeline;
mod rank;

pub use config::RankingConfig;
pub use pipeline::{FeedSnapshot, RankError, rank, rank_snapshot};
pub use rank::rank_hospitals;
