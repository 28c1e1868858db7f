//! Core data models for envwatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{CoreError, Result};

/// A validated WGS84 position in decimal degrees.
///
/// Construction rejects non-finite values and anything outside
/// latitude [-90, 90] / longitude [-180, 180]; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoreError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(CoreError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Ordered, implicitly closed vertex ring with at least three vertices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonRing(Vec<Coordinate>);

impl PolygonRing {
    pub const MIN_VERTICES: usize = 3;

    /// Returns `None` for degenerate rings.
    pub fn new(vertices: Vec<Coordinate>) -> Option<Self> {
        (vertices.len() >= Self::MIN_VERTICES).then_some(Self(vertices))
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Descriptive fields a utility publishes alongside an outage polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutageMetadata {
    pub start_time: Option<String>,
    pub customers_impacted: Option<String>,
    pub status: Option<String>,
    pub cause: Option<String>,
    pub last_update: Option<String>,
    pub restoration_estimate: Option<String>,
    pub point_of_interest: Option<String>,
}

/// One outage-affected area from a live feed.
///
/// `polygon` is `None` when the raw vertex list normalized to fewer than
/// three vertices; such an area never matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutageArea {
    pub polygon: Option<PolygonRing>,
    pub metadata: OutageMetadata,
}

/// Fixed flood-gauge monitoring location, optionally overlaid with a live reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
    pub flood_level: Option<String>,
    pub level_trend: Option<String>,
}

/// Live gauge status keyed by station id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeReading {
    pub location_id: String,
    pub flood_level: Option<String>,
    pub level_trend: Option<String>,
}

/// One forecast row from the air-quality provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiForecast {
    pub reporting_area: String,
    pub date_forecast: String,
    /// `None` when the provider cell was empty or not an integer.
    pub aqi: Option<i32>,
}

/// Forecast-grid weather at a point: distinct condition labels plus temperature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub conditions: BTreeSet<String>,
    pub temperature_celsius: Option<f64>,
}

// ========== REPORT ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    /// Fixed EPA breakpoints; each bound is inclusive.
    pub fn from_aqi(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: Option<i32>,
    pub category: Option<AqiCategory>,
}

impl AirQuality {
    /// Negative values are the provider's "no data" marker and map to unknown.
    pub fn from_aqi(aqi: i32) -> Self {
        if aqi < 0 {
            return Self::default();
        }
        Self {
            aqi: Some(aqi),
            category: Some(AqiCategory::from_aqi(aqi)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloodRisk {
    pub station_id: Option<String>,
    pub station_name: Option<String>,
    pub distance_km: Option<f64>,
    pub current_level: Option<String>,
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub conditions: BTreeSet<String>,
    pub temperature_celsius: Option<f64>,
    pub temperature_fahrenheit: Option<f64>,
}

impl From<WeatherObservation> for WeatherReport {
    fn from(observation: WeatherObservation) -> Self {
        Self {
            conditions: observation.conditions,
            temperature_celsius: observation.temperature_celsius,
            temperature_fahrenheit: observation.temperature_celsius.map(celsius_to_fahrenheit),
        }
    }
}

/// `celsius * 9/5 + 32`, rounded to two decimal places.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    ((celsius * 9.0 / 5.0 + 32.0) * 100.0).round() / 100.0
}

/// Unified per-query hazard report. Every field is independently nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReport {
    pub timestamp: DateTime<Utc>,
    pub air_quality: AirQuality,
    pub flood_risk: FloodRisk,
    /// `Some(true)` matched, `Some(false)` confirmed clear, `None` unknown.
    pub power_outage: Option<bool>,
    pub weather: WeatherReport,
}
