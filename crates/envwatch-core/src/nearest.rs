//! Nearest flood-gauge lookup.

use crate::error::{CoreError, Result};
use crate::models::{Coordinate, FloodRisk, Station};
use crate::spatial::{great_circle_distance, DistanceUnit};

/// The closest station to a query point and its distance in the requested unit.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestStation<'a> {
    pub station: &'a Station,
    pub distance: f64,
}

impl NearestStation<'_> {
    /// Flood summary for the report; `distance` must be in kilometers.
    pub fn to_flood_risk(&self) -> FloodRisk {
        FloodRisk {
            station_id: Some(self.station.id.clone()),
            station_name: Some(self.station.name.clone()),
            distance_km: Some(self.distance),
            current_level: self.station.flood_level.clone(),
            trend: self.station.level_trend.clone(),
        }
    }
}

/// Linear scan for the station at minimum great-circle distance.
///
/// Ties go to the station that appears first in `stations`.
pub fn find_nearest_station<'a>(
    point: &Coordinate,
    stations: &'a [Station],
    unit: DistanceUnit,
) -> Result<NearestStation<'a>> {
    let mut best: Option<NearestStation<'a>> = None;

    for station in stations {
        let distance = great_circle_distance(point, &station.location, unit);
        let closer = best
            .as_ref()
            .map(|current| distance < current.distance)
            .unwrap_or(true);
        if closer {
            best = Some(NearestStation { station, distance });
        }
    }

    best.ok_or(CoreError::EmptyCatalog)
}
