//! Flood-gauge station registry.
//!
//! The catalog is parsed once from a compact listing, one station per line:
//!
//! ```text
//! #USGS-38 Snoqualmie River- Below the Falls 47.545077, -121.842316
//! ```
//!
//! It is read-only after construction. Live gauge readings are overlaid onto
//! a per-request copy via [`StationCatalog::with_readings`].

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::error::{CoreError, Result};
use crate::models::{Coordinate, GaugeReading, Station};

/// Snoqualmie / Snohomish valley gauges, upstream to downstream.
pub const DEFAULT_LISTING: &str = r#"
#USGS-SF17 South Fork Snoqualmie River 47.415109, -121.587321
#USGS-MF11 Middle Fork Snoqualmie River 47.485912, -121.647864
#USGS-NF10 North Fork Snoqualmie River 47.614825, -121.713444
#USGS-38 Snoqualmie River- Below the Falls 47.545077, -121.842316
#SVPA-37 Snoqualmie Falls Golf Course 47.561390, -121.878524
#SVPA-36 Fall City - Neal Rd. SE 47.585410, -121.903805
#SVPA-34 The "T" at W Snoqualmie River Rd SE 47.587822, -121.926108
#SVPA-33 Snoqualmie River at SE 19th Way 47.592763, -121.921028
#SVPA-29 W Snoqualmie River Rd NE near Jubilee Farm 47.611599, -121.934404
#SVPA-26 W Snoqualmie River Rd NE at Blue Heron Golf Course 47.625158, -121.933527
#SVPA-25 Snoqualmie River at NE Tolt Hill Rd 47.638133, -121.928484
#USGS-22 Snoqualmie River at Carnation 47.665934, -121.925397
#SVPA-19 Staurt Landing - South of Oxbow Farm 47.688900, -121.963700
#SVPA-17 NE 100th St at Goose & Gander Farm 47.683900, -121.984500
#SVPA-15 NE 124th St (East) at Local Roots Farm 47.708603, -121.986294
#SVPA-15B NE 124th St (West) 47.709082, -122.003216
#SVPA-12 NE 138th St 47.722446, -121.997481
#USGS-9 Snoqualmie River at Duvall 47.743155, -121.987900
#USGS-SH5 Snohomish River at Monroe 47.830932, -122.048459
"#;

fn listing_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Z]+-[A-Z0-9]+)\s+(.*?)\s+(-?\d+\.\d+),\s*(-?\d+\.\d+)$")
            .expect("station listing pattern is valid")
    })
}

/// Immutable set of monitoring stations with unique ids, in listing order.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Vec<Station>,
}

/// Result of overlaying live readings onto the catalog.
#[derive(Debug, Clone)]
pub struct MergedCatalog {
    pub stations: Vec<Station>,
    /// Catalog stations that received no live reading.
    pub missing_readings: Vec<String>,
    /// Live reading ids with no catalog station.
    pub unmatched_readings: Vec<String>,
}

impl StationCatalog {
    /// Parse a listing, skipping (and logging) lines that do not match.
    pub fn parse(listing: &str) -> Self {
        let mut catalog = Self::default();
        for line in listing_lines(listing) {
            match parse_line(line) {
                Some(station) => catalog.push(station),
                None => tracing::warn!("Could not parse station listing line: {}", line),
            }
        }
        catalog
    }

    /// Parse a listing, failing on the first line that does not match.
    pub fn parse_strict(listing: &str) -> Result<Self> {
        let mut catalog = Self::default();
        for line in listing_lines(listing) {
            let station = parse_line(line).ok_or_else(|| CoreError::MalformedListing {
                line: line.to_string(),
            })?;
            catalog.push(station);
        }
        Ok(catalog)
    }

    /// The built-in Snoqualmie valley listing.
    pub fn builtin() -> Self {
        Self::parse(DEFAULT_LISTING)
    }

    fn push(&mut self, station: Station) {
        if self.stations.iter().any(|s| s.id == station.id) {
            tracing::warn!("Duplicate station id {} ignored", station.id);
            return;
        }
        self.stations.push(station);
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Copy the catalog with live readings overlaid by station id.
    ///
    /// When a feed repeats an id the last reading wins.
    pub fn with_readings(&self, readings: &[GaugeReading]) -> MergedCatalog {
        let by_id: HashMap<&str, &GaugeReading> = readings
            .iter()
            .map(|reading| (reading.location_id.as_str(), reading))
            .collect();

        let mut missing_readings = Vec::new();
        let stations: Vec<Station> = self
            .stations
            .iter()
            .map(|station| {
                let mut merged = station.clone();
                match by_id.get(station.id.as_str()) {
                    Some(reading) => {
                        merged.flood_level = reading.flood_level.clone();
                        merged.level_trend = reading.level_trend.clone();
                    }
                    None => missing_readings.push(station.id.clone()),
                }
                merged
            })
            .collect();

        let known: HashSet<&str> = self.stations.iter().map(|s| s.id.as_str()).collect();
        let mut unmatched_readings: Vec<String> = by_id
            .keys()
            .filter(|id| !known.contains(*id))
            .map(|id| id.to_string())
            .collect();
        unmatched_readings.sort();

        if !missing_readings.is_empty() {
            tracing::warn!(
                "{} stations didn't receive flood data: {:?}",
                missing_readings.len(),
                missing_readings
            );
        }
        if !unmatched_readings.is_empty() {
            tracing::warn!(
                "{} gauge readings weren't in the station catalog: {:?}",
                unmatched_readings.len(),
                unmatched_readings
            );
        }

        MergedCatalog {
            stations,
            missing_readings,
            unmatched_readings,
        }
    }
}

fn listing_lines(listing: &str) -> impl Iterator<Item = &str> {
    listing
        .lines()
        .map(str::trim)
        .map(|line| line.strip_prefix('#').map(str::trim).unwrap_or(line))
        .filter(|line| !line.is_empty())
}

fn parse_line(line: &str) -> Option<Station> {
    let caps = listing_pattern().captures(line)?;
    let latitude: f64 = caps[3].parse().ok()?;
    let longitude: f64 = caps[4].parse().ok()?;
    Some(Station {
        id: caps[1].to_string(),
        name: caps[2].trim().to_string(),
        location: Coordinate::new(latitude, longitude).ok()?,
        flood_level: None,
        level_trend: None,
    })
}
