//! Real-time bed availability and its lookup index.

use std::collections::HashMap;

use serde_json::Value;

use crate::feed::FeedKind;

use super::error::{RecordSkipped, SkipReason};
use super::fields::{number_of, text_field};

/// Facility id field, shared by both feeds.
pub const FACILITY_ID_FIELD: &str = "hpid";

/// Available intensive-care beds.
pub const ICU_BEDS_FIELD: &str = "hvicc";

/// Emergency-room operating flag.
pub const ER_FLAG_FIELD: &str = "hv7";

/// The exact value of [`ER_FLAG_FIELD`] meaning "operating".
///
/// Matching is case-sensitive; `"y"` or `"true"` count as not operating.
pub const ER_ACTIVE: &str = "Y";

/// Bed status of one facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedStatus {
    pub facility_id: String,
    pub intensive_care_beds: u32,
    pub er_active: bool,
}

impl BedStatus {
    /// Build from a raw bed-feed record.
    pub fn from_record(item: &Value) -> Result<Self, SkipReason> {
        let record = item.as_object().ok_or(SkipReason::NotAnObject)?;
        let facility_id =
            text_field(record, FACILITY_ID_FIELD).ok_or(SkipReason::MissingFacilityId)?;

        let er_active =
            matches!(record.get(ER_FLAG_FIELD), Some(Value::String(s)) if s == ER_ACTIVE);

        Ok(Self {
            facility_id,
            intensive_care_beds: parse_bed_count(record.get(ICU_BEDS_FIELD)),
            er_active,
        })
    }
}

/// Parse a bed count; absent, unparseable or negative values count as zero.
fn parse_bed_count(value: Option<&Value>) -> u32 {
    let Some(value) = value else {
        return 0;
    };

    if let Some(n) = value.as_u64() {
        return u32::try_from(n).unwrap_or(u32::MAX);
    }
    if let Some(Ok(n)) = value.as_str().map(|s| s.trim().parse::<u32>()) {
        return n;
    }

    // Fractional counts ("3.0") are truncated
    match number_of(value) {
        Some(n) if n >= 0.0 => n.trunc().min(f64::from(u32::MAX)) as u32,
        _ => 0,
    }
}

/// Lookup from facility id to its bed status.
///
/// If the feed repeats an id, the last record wins.
#[derive(Debug, Clone, Default)]
pub struct BedIndex {
    by_facility: HashMap<String, BedStatus>,
    skipped: Vec<RecordSkipped>,
}

impl BedIndex {
    /// Build the index from bed-feed records.
    ///
    /// Malformed records are logged and left out.
    pub fn build(items: &[Value]) -> Self {
        let mut index = Self::default();

        for (i, item) in items.iter().enumerate() {
            match BedStatus::from_record(item) {
                Ok(status) => {
                    index.by_facility.insert(status.facility_id.clone(), status);
                }
                Err(reason) => {
                    let skipped = RecordSkipped {
                        feed: FeedKind::Beds,
                        index: i,
                        reason,
                    };
                    skipped.log();
                    index.skipped.push(skipped);
                }
            }
        }

        index
    }

    /// Bed status for a facility.
    pub fn get(&self, facility_id: &str) -> Option<&BedStatus> {
        self.by_facility.get(facility_id)
    }

    /// Number of facilities in the index.
    pub fn len(&self) -> usize {
        self.by_facility.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_facility.is_empty()
    }

    /// Records left out while building.
    pub fn skipped(&self) -> &[RecordSkipped] {
        &self.skipped
    }
}
