//! National Weather Service gridpoint client.
//!
//! Weather is a two-step fetch: the points endpoint resolves the forecast
//! grid for a location, then the grid data carries temperature and hourly
//! condition labels.

use async_trait::async_trait;
use envwatch_core::{Coordinate, SourceError, WeatherObservation, WeatherSource};
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::http::{read_json, send_checked};

pub const DEFAULT_NWS_API_URL: &str = "https://api.weather.gov";

pub struct NwsClient {
    client: Client,
    base_url: String,
}

impl NwsClient {
    /// The NWS API rejects requests without a User-Agent; set one on `client`.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn points_url(&self, point: &Coordinate) -> String {
        format!(
            "{}/points/{},{}",
            self.base_url,
            round2(point.latitude()),
            round2(point.longitude())
        )
    }

    async fn forecast_grid_url(&self, point: &Coordinate) -> Result<String, SourceError> {
        let response = send_checked(self.client.get(self.points_url(point)), "NWS points").await?;
        let payload = read_json(response, "NWS points").await?;

        payload
            .pointer("/properties/forecastGridData")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                SourceError::Malformed("NWS points: missing properties.forecastGridData".to_string())
            })
    }
}

#[async_trait]
impl WeatherSource for NwsClient {
    async fn observation(&self, point: &Coordinate) -> Result<WeatherObservation, SourceError> {
        let grid_url = self.forecast_grid_url(point).await?;
        tracing::debug!("Resolved NWS grid {}", grid_url);

        let response = send_checked(self.client.get(&grid_url), "NWS grid data").await?;
        let payload = read_json(response, "NWS grid data").await?;
        parse_grid_data(&payload)
    }
}

/// Temperature and deduplicated condition labels from a grid data payload.
pub fn parse_grid_data(payload: &Value) -> Result<WeatherObservation, SourceError> {
    let properties = payload
        .get("properties")
        .ok_or_else(|| SourceError::Malformed("NWS grid data: missing properties".to_string()))?;

    let temperature_celsius = properties
        .pointer("/temperature/values/0/value")
        .and_then(Value::as_f64)
        .filter(|value| value.is_finite());

    let conditions: BTreeSet<String> = properties
        .pointer("/weather/values")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(|entry| entry.pointer("/value/0/weather"))
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(WeatherObservation {
        conditions,
        temperature_celsius,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn points_url_uses_two_decimals() {
        let client = NwsClient::new(Client::new(), "https://api.weather.gov/");
        let point = Coordinate::new(47.59645, -122.1165).unwrap();
        assert_eq!(
            client.points_url(&point),
            "https://api.weather.gov/points/47.6,-122.12"
        );
    }

    #[test]
    fn grid_data_yields_temperature_and_unique_labels() {
        let payload = json!({"properties": {
            "temperature": {"uom": "wmoUnit:degC", "values": [
                {"validTime": "2024-11-20T18:00:00+00:00/PT1H", "value": 8.333}
            ]},
            "weather": {"values": [
                {"value": [{"weather": "rain_showers", "intensity": "light"}]},
                {"value": [{"weather": null}]},
                {"value": [{"weather": "rain_showers"}]},
                {"value": []},
                {"value": [{"weather": "fog"}]}
            ]}
        }});

        let observation = parse_grid_data(&payload).unwrap();
        assert_eq!(observation.temperature_celsius, Some(8.333));
        assert_eq!(observation.conditions.len(), 2);
        assert!(observation.conditions.contains("fog"));
    }

    #[test]
    fn missing_series_are_empty_not_errors() {
        let observation = parse_grid_data(&json!({"properties": {}})).unwrap();
        assert!(observation.conditions.is_empty());
        assert!(observation.temperature_celsius.is_none());

        assert!(parse_grid_data(&json!({"type": "Feature"})).is_err());
    }
}
