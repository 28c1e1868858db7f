//! Outage-area construction and point matching.

use serde_json::Value;

use crate::error::SourceError;
use crate::models::{Coordinate, OutageArea, OutageMetadata};
use crate::polygon::{normalize_ring, text_value};
use crate::spatial::point_in_polygon;

/// True iff `point` lies inside at least one area's polygon.
///
/// Stops at the first match. Areas without a usable ring never match.
pub fn any_area_contains(point: &Coordinate, areas: &[OutageArea]) -> bool {
    areas.iter().any(|area| {
        area.polygon
            .as_ref()
            .is_some_and(|ring| point_in_polygon(point, ring))
    })
}

/// Build outage areas from a PSE-style outage map payload in one pass.
///
/// The top-level `PseMap` array is required; individual entries are
/// tolerated field by field.
pub fn parse_outage_feed(payload: &Value) -> Result<Vec<OutageArea>, SourceError> {
    let entries = payload
        .get("PseMap")
        .and_then(Value::as_array)
        .ok_or_else(|| SourceError::Malformed("outage feed missing PseMap array".to_string()))?;

    Ok(entries.iter().map(parse_outage_entry).collect())
}

/// Build one outage area from a raw feed entry.
pub fn parse_outage_entry(entry: &Value) -> OutageArea {
    let polygon = entry
        .get("Polygon")
        .and_then(Value::as_array)
        .and_then(|records| normalize_ring(records));

    OutageArea {
        polygon,
        metadata: parse_metadata(entry.get("DataProvider")),
    }
}

fn parse_metadata(provider: Option<&Value>) -> OutageMetadata {
    let Some(provider) = provider else {
        return OutageMetadata::default();
    };

    let attribute = |index: usize| {
        provider
            .get("Attributes")
            .and_then(|attrs| attrs.get(index))
            .and_then(|attr| attr.get("Value"))
            .and_then(text_value)
    };

    let point_of_interest = provider.get("PointOfInterest").and_then(|poi| {
        let parts: Vec<String> = ["Latitude", "Longitude", "Title"]
            .iter()
            .filter_map(|key| poi.get(*key).and_then(text_value))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    });

    OutageMetadata {
        start_time: attribute(0),
        customers_impacted: attribute(1),
        status: attribute(2),
        cause: attribute(3),
        last_update: attribute(4),
        restoration_estimate: attribute(5),
        point_of_interest,
    }
}
