//! Flood gauge readings client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use envwatch_core::{text_value, FloodGaugeSource, GaugeReading, ReadingWindow, SourceError};
use reqwest::Client;
use serde_json::Value;

use crate::http::{read_json, send_checked};

pub const DEFAULT_FLOOD_GAUGE_URL: &str =
    "https://prodplanreadingsvc.azurewebsites.net/api/GetGageStatusAndRecentReadings";
pub const DEFAULT_REGION_ID: u32 = 1;

const WHAT: &str = "Flood gauge readings";

pub struct GaugeReadingsClient {
    client: Client,
    url: String,
    region_id: u32,
}

impl GaugeReadingsClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            region_id: DEFAULT_REGION_ID,
        }
    }

    pub fn with_region_id(mut self, region_id: u32) -> Self {
        self.region_id = region_id;
        self
    }
}

#[async_trait]
impl FloodGaugeSource for GaugeReadingsClient {
    async fn readings(&self, window: &ReadingWindow) -> Result<Vec<GaugeReading>, SourceError> {
        let request = self.client.get(&self.url).query(&[
            ("regionId", self.region_id.to_string()),
            ("fromDateTime", http_date(&window.from)),
            ("toDateTime", http_date(&window.to)),
        ]);

        let response = send_checked(request, WHAT).await?;
        let payload = read_json(response, WHAT).await?;
        parse_gauge_payload(&payload)
    }
}

/// `Tue, 19 Nov 2024 00:00:00 GMT`
pub fn http_date(at: &DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Readings from a `{"gages": [...]}` payload. Gages without a location id are skipped.
pub fn parse_gauge_payload(payload: &Value) -> Result<Vec<GaugeReading>, SourceError> {
    let gages = payload
        .get("gages")
        .and_then(Value::as_array)
        .ok_or_else(|| SourceError::Malformed(format!("{WHAT}: missing gages array")))?;

    let mut readings = Vec::with_capacity(gages.len());
    for gage in gages {
        let Some(location_id) = gage.get("locationId").and_then(text_value) else {
            tracing::debug!("Skipping gage without locationId");
            continue;
        };
        let status = gage.get("status");
        let field = |key: &str| status.and_then(|s| s.get(key)).and_then(text_value);

        readings.push(GaugeReading {
            location_id,
            flood_level: field("floodLevel"),
            level_trend: field("levelTrend"),
        });
    }

    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn window_formats_as_gmt() {
        let window = ReadingWindow::starting(NaiveDate::from_ymd_opt(2024, 11, 19).unwrap());
        assert_eq!(http_date(&window.from), "Tue, 19 Nov 2024 00:00:00 GMT");
        assert_eq!(http_date(&window.to), "Thu, 21 Nov 2024 00:00:00 GMT");
    }

    #[test]
    fn gages_become_readings() {
        let payload = json!({"gages": [
            {"locationId": "SVPA-29", "status": {"floodLevel": "Normal", "levelTrend": "Falling"}},
            {"locationId": "USGS-SF17", "status": {"floodLevel": "Minor"}},
            {"status": {"floodLevel": "Major"}},
            {"locationId": "USGS-22", "status": null}
        ]});

        let readings = parse_gauge_payload(&payload).unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].level_trend.as_deref(), Some("Falling"));
        assert_eq!(readings[1].flood_level.as_deref(), Some("Minor"));
        assert!(readings[1].level_trend.is_none());
        assert_eq!(readings[2].location_id, "USGS-22");
        assert!(readings[2].flood_level.is_none());
    }

    #[test]
    fn payload_without_gages_is_malformed() {
        let err = parse_gauge_payload(&json!({"data": []})).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }
}
