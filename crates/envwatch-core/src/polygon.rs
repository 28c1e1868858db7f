//! Normalization of raw provider vertex records into typed rings.
//!
//! Providers disagree on key casing (`Latitude`, `latitude`, `lat`) and on
//! whether numbers arrive as JSON numbers or strings. Each record is parsed
//! on its own; a bad record is dropped without affecting its neighbours.

use serde_json::{Map, Value};

use crate::models::{Coordinate, PolygonRing};

const LATITUDE_KEYS: &[&str] = &["latitude", "lat"];
const LONGITUDE_KEYS: &[&str] = &["longitude", "lon", "lng", "long"];

/// Parse every record that carries a usable latitude/longitude pair, in input order.
pub fn normalize_vertices(records: &[Value]) -> Vec<Coordinate> {
    records.iter().filter_map(parse_vertex).collect()
}

/// Normalize records into a ring; `None` when fewer than three vertices survive.
pub fn normalize_ring(records: &[Value]) -> Option<PolygonRing> {
    PolygonRing::new(normalize_vertices(records))
}

fn parse_vertex(record: &Value) -> Option<Coordinate> {
    let object = record.as_object()?;
    let latitude = lookup_number(object, LATITUDE_KEYS)?;
    let longitude = lookup_number(object, LONGITUDE_KEYS)?;
    Coordinate::new(latitude, longitude).ok()
}

/// First alias, in `keys` order, whose value parses as a number.
fn lookup_number(object: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|alias| {
        object
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(alias))
            .find_map(|(_, value)| as_f64(value))
    })
}

/// Numeric value from a JSON number or a numeric string.
pub(crate) fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// String content of a JSON scalar, for provider fields that arrive as
/// either strings or numbers. Blank strings are `None`.
pub fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
