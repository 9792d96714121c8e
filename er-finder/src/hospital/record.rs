//! Canonical facility and hospital records.

use std::cmp::Ordering;
use std::fmt;

use crate::geo::{Coordinate, distance_m};

use super::bed::BedStatus;
use super::departments::DepartmentRules;

/// Shown in place of a distance that could not be computed.
pub const DISTANCE_UNAVAILABLE: &str = "N/A";

/// Distance from the user to a facility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    /// Kilometres, rounded to one decimal place
    Km(f64),
    /// Either position was unknown, or the computation was not finite
    Unavailable,
}

impl Distance {
    /// Convert metres to kilometres rounded to one decimal place.
    ///
    /// Metres are rounded to whole metres first.
    pub fn from_meters(meters: f64) -> Self {
        let km = (meters.round() / 100.0).round() / 10.0;
        if km.is_finite() {
            Distance::Km(km)
        } else {
            Distance::Unavailable
        }
    }

    /// Distance from `user` to a facility, if the facility position is known.
    pub fn between(user: Coordinate, facility: Option<Coordinate>) -> Self {
        match facility {
            Some(at) => Distance::from_meters(distance_m(user, at)),
            None => Distance::Unavailable,
        }
    }

    pub fn km(&self) -> Option<f64> {
        match self {
            Distance::Km(km) => Some(*km),
            Distance::Unavailable => None,
        }
    }

    /// Ranking order: ascending kilometres, with unavailable distances last.
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Distance::Km(a), Distance::Km(b)) => a.total_cmp(b),
            (Distance::Km(_), Distance::Unavailable) => Ordering::Less,
            (Distance::Unavailable, Distance::Km(_)) => Ordering::Greater,
            (Distance::Unavailable, Distance::Unavailable) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Km(km) => write!(f, "{km:.1}"),
            Distance::Unavailable => f.write_str(DISTANCE_UNAVAILABLE),
        }
    }
}

/// A normalized facility-feed record, before bed status is joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    /// Facility id, or a synthesized id unique within one fetch
    pub id: String,
    /// Facility id as published, used to join with the bed feed
    pub facility_id: Option<String>,
    pub name: String,
    pub coordinate: Option<Coordinate>,
    pub distance: Distance,
    pub address: Option<String>,
    /// Emergency phone line, or the main line when there is none
    pub phone: Option<String>,
    /// Emergency medical institution classification
    pub emergency_class: Option<String>,
}

/// A facility joined with its bed status.
#[derive(Debug, Clone, PartialEq)]
pub struct Hospital {
    pub id: String,
    pub facility_id: Option<String>,
    pub name: String,
    pub coordinate: Option<Coordinate>,
    pub distance: Distance,
    /// Available intensive-care beds; 0 without a bed record
    pub intensive_care_beds: u32,
    /// Whether the emergency room is operating; false without a bed record
    pub er_active: bool,
    /// Departments label derived from the classification
    pub departments: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub emergency_class: Option<String>,
}

impl Hospital {
    /// Join a facility with its bed status, if any.
    pub fn assemble(facility: Facility, beds: Option<&BedStatus>, rules: &DepartmentRules) -> Self {
        let departments = rules.label_for(facility.emergency_class.as_deref()).to_string();

        Self {
            id: facility.id,
            facility_id: facility.facility_id,
            name: facility.name,
            coordinate: facility.coordinate,
            distance: facility.distance,
            intensive_care_beds: beds.map_or(0, |b| b.intensive_care_beds),
            er_active: beds.is_some_and(|b| b.er_active),
            departments,
            address: facility.address,
            phone: facility.phone,
            emergency_class: facility.emergency_class,
        }
    }

    /// An operating emergency room with at least one free ICU bed.
    pub fn is_qualifying(&self) -> bool {
        self.er_active && self.intensive_care_beds > 0
    }
}
