//! Report assembly with per-field failure isolation.
//!
//! The four upstream branches run concurrently. An upstream failure or a
//! missed deadline only nulls its own field; the report shape is always
//! complete. Only caller or configuration defects (empty station catalog)
//! escape as errors.

use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, SourceError};
use crate::models::{AirQuality, Coordinate, EnvironmentalReport, FloodRisk, WeatherReport};
use crate::nearest::find_nearest_station;
use crate::outage::any_area_contains;
use crate::sources::{
    AirQualitySource, FloodGaugeSource, OutageSource, ReadingWindow, WeatherSource,
};
use crate::spatial::DistanceUnit;
use crate::stations::StationCatalog;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// The upstream collaborators a report is built from.
#[derive(Clone)]
pub struct Sources {
    pub air_quality: Arc<dyn AirQualitySource>,
    pub outages: Arc<dyn OutageSource>,
    pub flood_gauges: Arc<dyn FloodGaugeSource>,
    pub weather: Arc<dyn WeatherSource>,
}

#[derive(Clone)]
pub struct ReportAssembler {
    sources: Sources,
    catalog: Arc<StationCatalog>,
    fetch_timeout: Duration,
}

impl ReportAssembler {
    pub fn new(sources: Sources, catalog: Arc<StationCatalog>) -> Self {
        Self {
            sources,
            catalog,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Deadline applied to each upstream fetch independently.
    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Build the report for `point`.
    pub async fn assemble(&self, point: Coordinate) -> Result<EnvironmentalReport> {
        let (air_quality, power_outage, flood_risk, weather) = tokio::join!(
            self.air_quality(&point),
            self.power_outage(&point),
            self.flood_risk(&point),
            self.weather(&point),
        );

        Ok(EnvironmentalReport {
            timestamp: Utc::now(),
            air_quality,
            flood_risk: flood_risk?,
            power_outage,
            weather,
        })
    }

    async fn air_quality(&self, point: &Coordinate) -> AirQuality {
        match self.timed(self.sources.air_quality.forecast(point)).await {
            // Only the first row counts; a bad value there means unknown.
            Ok(rows) => rows
                .first()
                .and_then(|row| row.aqi)
                .map(AirQuality::from_aqi)
                .unwrap_or_default(),
            Err(err) => {
                tracing::warn!("Air quality unavailable: {}", err);
                AirQuality::default()
            }
        }
    }

    async fn power_outage(&self, point: &Coordinate) -> Option<bool> {
        match self.timed(self.sources.outages.outage_areas()).await {
            Ok(areas) => {
                tracing::debug!("Checking {} outage areas", areas.len());
                Some(any_area_contains(point, &areas))
            }
            Err(err) => {
                tracing::warn!("Power outage status unknown: {}", err);
                None
            }
        }
    }

    async fn flood_risk(&self, point: &Coordinate) -> Result<FloodRisk> {
        let window = ReadingWindow::starting(Utc::now().date_naive());
        let stations = match self.timed(self.sources.flood_gauges.readings(&window)).await {
            Ok(readings) => self.catalog.with_readings(&readings).stations,
            Err(err) => {
                tracing::warn!("Flood readings unavailable, using bare catalog: {}", err);
                self.catalog.stations().to_vec()
            }
        };

        let nearest = find_nearest_station(point, &stations, DistanceUnit::Kilometers)?;
        Ok(nearest.to_flood_risk())
    }

    async fn weather(&self, point: &Coordinate) -> WeatherReport {
        match self.timed(self.sources.weather.observation(point)).await {
            Ok(observation) => WeatherReport::from(observation),
            Err(err) => {
                tracing::warn!("Weather unavailable: {}", err);
                WeatherReport::default()
            }
        }
    }

    async fn timed<T, F>(&self, fetch: F) -> std::result::Result<T, SourceError>
    where
        F: Future<Output = std::result::Result<T, SourceError>>,
    {
        tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .unwrap_or(Err(SourceError::TimedOut(self.fetch_timeout)))
    }
}
