//! Hospital records: normalization, bed availability, and presentation.
//!
//! Facility-feed records are normalized into [`Facility`] values, bed-feed
//! records are indexed by facility id in a [`BedIndex`], and the two are
//! joined into [`Hospital`] values by [`Hospital::assemble`].

mod bed;
mod departments;
mod error;
mod fields;
mod navigation;
mod normalize;
mod record;

pub use bed::{BedIndex, BedStatus, ER_ACTIVE};
pub use departments::{DepartmentRule, DepartmentRules, RulesError};
pub use error::{RecordSkipped, SkipReason};
pub use fields::FieldCandidates;
pub use navigation::{MINUTES_PER_KM, estimated_arrival, map_link};
pub use normalize::{NormalizeOptions, normalize, synthesized_id};
pub use record::{DISTANCE_UNAVAILABLE, Distance, Facility, Hospital};
