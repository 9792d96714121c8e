//! Facility-feed normalization.
//!
//! Turns loosely-typed facility records into [`Facility`] values: resolves
//! the position through the candidate field lists, computes the distance to
//! the user, and assigns an id. Per-record problems degrade rather than
//! fail: an unknown position gives an unavailable distance, a missing
//! facility id gives a synthesized one, and only records that are not
//! objects at all are skipped.

use serde_json::{Map, Value};

use crate::feed::FeedKind;
use crate::geo::Coordinate;

use super::bed::FACILITY_ID_FIELD;
use super::error::{RecordSkipped, SkipReason};
use super::fields::{FieldCandidates, text_field};
use super::record::{Distance, Facility};

const NAME_FIELD: &str = "dutyName";
const ADDRESS_FIELD: &str = "dutyAddr";
const MAIN_PHONE_FIELD: &str = "dutyTel1";
const EMERGENCY_PHONE_FIELD: &str = "dutyTel3";
const CLASS_FIELD: &str = "dutyEmclsName";

/// Options for [`normalize`].
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions<'a> {
    pub candidates: &'a FieldCandidates,
    /// Name used when a record has none
    pub unnamed_label: &'a str,
}

/// Id for a facility without a published one.
///
/// Unique only within a single fetch.
pub fn synthesized_id(index: usize, fetch_epoch: i64) -> String {
    format!("hospital-{index}-{fetch_epoch}")
}

/// Normalize facility-feed records, preserving feed order.
///
/// `fetch_epoch` feeds synthesized ids; pass a fixed value for
/// reproducible output.
pub fn normalize(
    items: &[Value],
    user: Coordinate,
    fetch_epoch: i64,
    options: NormalizeOptions<'_>,
) -> Vec<Facility> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            match normalize_item(index, item, user, fetch_epoch, options) {
                Ok(facility) => Some(facility),
                Err(reason) => {
                    RecordSkipped {
                        feed: FeedKind::Facilities,
                        index,
                        reason,
                    }
                    .log();
                    None
                }
            }
        })
        .collect()
}

fn normalize_item(
    index: usize,
    item: &Value,
    user: Coordinate,
    fetch_epoch: i64,
    options: NormalizeOptions<'_>,
) -> Result<Facility, SkipReason> {
    let record = item.as_object().ok_or(SkipReason::NotAnObject)?;

    let facility_id = text_field(record, FACILITY_ID_FIELD);
    let id = facility_id
        .clone()
        .unwrap_or_else(|| synthesized_id(index, fetch_epoch));

    let coordinate = resolve_coordinate(record, options.candidates, &id);
    let distance = Distance::between(user, coordinate);

    Ok(Facility {
        id,
        facility_id,
        name: text_field(record, NAME_FIELD).unwrap_or_else(|| options.unnamed_label.to_string()),
        coordinate,
        distance,
        address: text_field(record, ADDRESS_FIELD),
        phone: text_field(record, EMERGENCY_PHONE_FIELD)
            .or_else(|| text_field(record, MAIN_PHONE_FIELD)),
        emergency_class: text_field(record, CLASS_FIELD),
    })
}

fn resolve_coordinate(
    record: &Map<String, Value>,
    candidates: &FieldCandidates,
    id: &str,
) -> Option<Coordinate> {
    let lat = candidates.latitude_of(record)?;
    let lon = candidates.longitude_of(record)?;

    match Coordinate::new(lat, lon) {
        Ok(c) => Some(c),
        Err(e) => {
            tracing::debug!(facility = id, error = %e, "ignoring facility position");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const EPOCH: i64 = 1_700_000_000_000;

    fn user() -> Coordinate {
        Coordinate::new(37.5, 127.0).unwrap()
    }

    fn run(items: &[Value]) -> Vec<Facility> {
        let candidates = FieldCandidates::default();
        normalize(
            items,
            user(),
            EPOCH,
            NormalizeOptions {
                candidates: &candidates,
                unnamed_label: "이름 없음",
            },
        )
    }

    #[test]
    fn facility_at_user_position() {
        let out = run(&[json!({
            "hpid": "A1",
            "dutyName": "Seoul ER",
            "wgs84Lat": "37.5",
            "wgs84Lon": "127.0"
        })]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "A1");
        assert_eq!(out[0].facility_id.as_deref(), Some("A1"));
        assert_eq!(out[0].name, "Seoul ER");
        assert_eq!(out[0].distance.to_string(), "0.0");
    }

    #[test]
    fn missing_coordinates_give_unavailable_distance() {
        let out = run(&[json!({"hpid": "A1", "dutyName": "No Position"})]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].coordinate, None);
        assert_eq!(out[0].distance, Distance::Unavailable);
    }

    #[test]
    fn half_a_coordinate_is_no_coordinate() {
        let out = run(&[json!({"hpid": "A1", "wgs84Lat": "37.5"})]);
        assert_eq!(out[0].distance, Distance::Unavailable);
    }

    #[test]
    fn out_of_range_coordinate_is_ignored() {
        let out = run(&[json!({"hpid": "A1", "wgs84Lat": "127.0", "wgs84Lon": "37.5"})]);
        assert_eq!(out[0].coordinate, None);
        assert_eq!(out[0].distance, Distance::Unavailable);
    }

    #[test]
    fn alternate_field_names() {
        let out = run(&[json!({"hpid": "A1", "YPos": "37.6", "XPos": "127.0"})]);
        assert_eq!(out[0].coordinate, Coordinate::new(37.6, 127.0).ok());
        assert_eq!(out[0].distance, Distance::Km(11.1));
    }

    #[test]
    fn synthesizes_missing_ids() {
        let out = run(&[
            json!({"hpid": "A1"}),
            json!({"dutyName": "Anonymous"}),
            json!({"hpid": "  "}),
        ]);

        assert_eq!(out[0].id, "A1");
        assert_eq!(out[1].id, format!("hospital-1-{EPOCH}"));
        assert_eq!(out[1].facility_id, None);
        assert_eq!(out[2].id, format!("hospital-2-{EPOCH}"));
    }

    #[test]
    fn unnamed_label_and_optional_fields() {
        let out = run(&[json!({
            "hpid": "A1",
            "dutyAddr": "서울특별시 종로구",
            "dutyTel1": "02-000-0000",
            "dutyEmclsName": "응급실운영신고기관"
        })]);

        assert_eq!(out[0].name, "이름 없음");
        assert_eq!(out[0].address.as_deref(), Some("서울특별시 종로구"));
        assert_eq!(out[0].phone.as_deref(), Some("02-000-0000"));
        assert_eq!(out[0].emergency_class.as_deref(), Some("응급실운영신고기관"));
    }

    #[test]
    fn emergency_line_preferred() {
        let out = run(&[json!({"hpid": "A1", "dutyTel1": "main", "dutyTel3": "er"})]);
        assert_eq!(out[0].phone.as_deref(), Some("er"));
    }

    #[test]
    fn non_object_records_are_skipped() {
        let out = run(&[json!(""), json!({"hpid": "A1"}), json!(["x"])]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "A1");
    }

    #[test]
    fn preserves_feed_order() {
        let out = run(&[json!({"hpid": "C"}), json!({"hpid": "A"}), json!({"hpid": "B"})]);
        let ids: Vec<_> = out.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["C", "A", "B"]);
    }

    #[test]
    fn idempotent_with_fixed_epoch() {
        let items = [
            json!({"hpid": "A1", "wgs84Lat": "37.55", "wgs84Lon": "127.05"}),
            json!({"dutyName": "x", "lat": "37.4", "lon": "126.9"}),
        ];
        assert_eq!(run(&items), run(&items));
    }
}
