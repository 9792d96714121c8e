//! Hand-off data for navigating to a hospital.

use chrono::{DateTime, TimeDelta, TimeZone};

use crate::uri::encode_component;

use super::record::{Distance, Hospital};

/// Kakao Map place-link base.
const KAKAO_MAP_LINK: &str = "https://map.kakao.com/link/map";

/// Assumed travel time per kilometre, in minutes.
pub const MINUTES_PER_KM: f64 = 2.0;

/// Kakao Map link showing the hospital, if its position is known.
pub fn map_link(hospital: &Hospital) -> Option<String> {
    let at = hospital.coordinate?;
    Some(format!(
        "{}/{},{},{}",
        KAKAO_MAP_LINK,
        encode_component(&hospital.name),
        at.latitude(),
        at.longitude()
    ))
}

/// Expected arrival time as `HH:MM`, assuming [`MINUTES_PER_KM`].
///
/// An unavailable distance counts as zero.
pub fn estimated_arrival<Tz: TimeZone>(distance: Distance, now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let minutes = distance.km().unwrap_or(0.0) * MINUTES_PER_KM;
    let travel =
        TimeDelta::try_seconds((minutes * 60.0).round() as i64).unwrap_or(TimeDelta::zero());
    (now + travel).format("%H:%M").to_string()
}
