//! Field access on loosely-typed feed records.
//!
//! Feed records are `serde_json` objects whose leaves are strings (from XML
//! text) or, for hand-built records, numbers. Coordinate fields are not
//! named consistently across feed variants, so each is resolved by trying a
//! prioritized list of candidate names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prioritized candidate field names for coordinates.
///
/// Adding a feed variant means appending a name here, not adding a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCandidates {
    pub latitude: Vec<String>,
    pub longitude: Vec<String>,
}

impl Default for FieldCandidates {
    fn default() -> Self {
        let names = |list: &[&str]| list.iter().map(|s| (*s).to_string()).collect();
        Self {
            latitude: names(&["wgs84Lat", "latitude", "lat", "YPos", "y"]),
            longitude: names(&["wgs84Lon", "longitude", "lon", "lng", "XPos", "x"]),
        }
    }
}

impl FieldCandidates {
    /// First latitude candidate holding a finite number.
    pub fn latitude_of(&self, record: &Map<String, Value>) -> Option<f64> {
        first_number(record, &self.latitude)
    }

    /// First longitude candidate holding a finite number.
    pub fn longitude_of(&self, record: &Map<String, Value>) -> Option<f64> {
        first_number(record, &self.longitude)
    }
}

/// Value of the first candidate field that parses as a finite number.
pub fn first_number(record: &Map<String, Value>, candidates: &[String]) -> Option<f64> {
    candidates
        .iter()
        .find_map(|name| record.get(name).and_then(number_of))
}

/// Interpret a leaf as a finite number.
pub fn number_of(value: &Value) -> Option<f64> {
    let n = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Interpret a leaf as non-empty text.
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-empty text of a named field.
pub fn text_field(record: &Map<String, Value>, name: &str) -> Option<String> {
    record.get(name).and_then(text_of)
}
