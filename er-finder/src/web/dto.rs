//! Data transfer objects for web requests and responses.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::hospital::{Hospital, estimated_arrival, map_link};
use crate::session::Session;

/// Query for the ranked hospital list.
///
/// Coordinates arrive as text so malformed values get our own error body.
#[derive(Debug, Default, Deserialize)]
pub struct HospitalsQuery {
    /// Latitude in decimal degrees
    pub lat: Option<String>,

    /// Longitude in decimal degrees
    pub lon: Option<String>,
}

/// A hospital in the ranked list.
#[derive(Debug, Serialize)]
pub struct HospitalResult {
    /// Facility id (`hpid`, or a synthesized one)
    pub id: String,

    pub name: String,

    /// Kilometres with one decimal, or "N/A"
    pub distance_km: String,

    /// Available intensive-care beds
    pub icu_beds: u32,

    /// Whether the emergency room is operating
    pub er_active: bool,

    /// Department label, e.g. "내과, 외과"
    pub departments: String,

    pub address: Option<String>,

    /// Emergency line, or the main line
    pub phone: Option<String>,

    pub emergency_class: Option<String>,

    /// Kakao Map link, when the position is known
    pub map_link: Option<String>,

    /// Expected arrival as HH:MM
    pub estimated_arrival: String,
}

impl HospitalResult {
    /// Convert a hospital, estimating arrival from `now`.
    pub fn from_hospital<Tz: TimeZone>(hospital: &Hospital, now: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: hospital.id.clone(),
            name: hospital.name.clone(),
            distance_km: hospital.distance.to_string(),
            icu_beds: hospital.intensive_care_beds,
            er_active: hospital.er_active,
            departments: hospital.departments.clone(),
            address: hospital.address.clone(),
            phone: hospital.phone.clone(),
            emergency_class: hospital.emergency_class.clone(),
            map_link: map_link(hospital),
            estimated_arrival: estimated_arrival(hospital.distance, now),
        }
    }
}

/// The user's position as echoed back.
#[derive(Debug, Serialize)]
pub struct LocationView {
    pub lat: f64,
    pub lon: f64,
}

/// Response for the ranked hospital list.
#[derive(Debug, Serialize)]
pub struct HospitalsResponse {
    pub location: LocationView,

    /// When the list was ranked (RFC 3339); cached feed bodies may be older
    pub fetched_at: String,

    pub count: usize,

    /// Nearest first
    pub hospitals: Vec<HospitalResult>,
}

impl HospitalsResponse {
    pub fn from_session<Tz: TimeZone>(session: &Session, now: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let hospitals: Vec<HospitalResult> = session
            .hospitals()
            .iter()
            .map(|h| HospitalResult::from_hospital(h, now.clone()))
            .collect();

        Self {
            location: LocationView {
                lat: session.location().latitude(),
                lon: session.location().longitude(),
            },
            fetched_at: session.fetched_at().to_rfc3339(),
            count: hospitals.len(),
            hospitals,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Diagnostic detail, such as a snippet of an unexpected feed body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
