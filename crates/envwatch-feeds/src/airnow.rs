//! AirNow AQI forecast client.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use envwatch_core::{AirQualitySource, AqiForecast, Coordinate, SourceError};
use reqwest::Client;

use crate::http::{read_text, send_checked};

pub const DEFAULT_AIRNOW_URL: &str = "https://www.airnowapi.org/aq/forecast/latLong/";
pub const DEFAULT_DISTANCE_MILES: u32 = 15;

const WHAT: &str = "AirNow forecast";

/// HTTP client for the AirNow lat/long forecast endpoint.
pub struct AirNowClient {
    client: Client,
    url: String,
    api_key: String,
    distance_miles: u32,
}

impl AirNowClient {
    pub fn new(client: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into().trim().to_string(),
            distance_miles: DEFAULT_DISTANCE_MILES,
        }
    }

    pub fn with_distance_miles(mut self, distance_miles: u32) -> Self {
        self.distance_miles = distance_miles;
        self
    }

    /// Fetch the forecast issued for `date`.
    pub async fn forecast_on(
        &self,
        point: &Coordinate,
        date: NaiveDate,
    ) -> Result<Vec<AqiForecast>, SourceError> {
        if self.api_key.is_empty() {
            return Err(SourceError::Unavailable(
                "AirNow API key not configured".to_string(),
            ));
        }

        let request = self.client.get(&self.url).query(&[
            ("format", "text/csv".to_string()),
            ("latitude", point.latitude().to_string()),
            ("longitude", point.longitude().to_string()),
            ("date", date.format("%Y-%m-%d").to_string()),
            ("distance", self.distance_miles.to_string()),
            ("API_KEY", self.api_key.clone()),
        ]);

        let response = send_checked(request, WHAT).await?;
        let body = read_text(response, WHAT).await?;
        let rows = parse_forecast_csv(&body)?;
        tracing::debug!("AirNow returned {} forecast rows", rows.len());
        Ok(rows)
    }
}

#[async_trait]
impl AirQualitySource for AirNowClient {
    async fn forecast(&self, point: &Coordinate) -> Result<Vec<AqiForecast>, SourceError> {
        self.forecast_on(point, Utc::now().date_naive()).await
    }
}

/// Parse the AirNow CSV body. An empty body is "no forecast", not an error.
pub fn parse_forecast_csv(body: &str) -> Result<Vec<AqiForecast>, SourceError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| SourceError::Malformed(format!("{WHAT}: unreadable header: {err}")))?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|field| field == name)
            .ok_or_else(|| SourceError::Malformed(format!("{WHAT}: missing {name} column")))
    };
    let idx_area = column("ReportingArea")?;
    let idx_date = column("DateForecast")?;
    let idx_aqi = column("AQI")?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!("Skipping unreadable AirNow row: {}", err);
                continue;
            }
        };
        rows.push(AqiForecast {
            reporting_area: record.get(idx_area).unwrap_or_default().to_string(),
            date_forecast: record.get(idx_date).unwrap_or_default().to_string(),
            aqi: record.get(idx_aqi).and_then(|value| value.parse::<i32>().ok()),
        });
    }

    Ok(rows)
}
