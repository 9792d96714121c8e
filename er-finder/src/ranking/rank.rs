//! Hospital ranking.
//!
//! Keeps qualifying hospitals and orders them nearest-first.

use crate::hospital::Hospital;

/// Keep qualifying hospitals, nearest first.
///
/// A hospital qualifies iff its emergency room is operating and it has at
/// least one intensive-care bed. Ordering is ascending distance with
/// unavailable distances last; the sort is stable, so ties keep feed order.
pub fn rank_hospitals(hospitals: Vec<Hospital>) -> Vec<Hospital> {
    let mut ranked: Vec<Hospital> = hospitals.into_iter().filter(Hospital::is_qualifying).collect();
    ranked.sort_by(|a, b| a.distance.ranking_cmp(&b.distance));
    ranked
}
