//! Upstream data-source seams.
//!
//! Each trait is one independently failing collaborator of the report
//! assembler. Implementations translate transport and payload problems into
//! [`SourceError`] at their own boundary.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::SourceError;
use crate::models::{AqiForecast, Coordinate, GaugeReading, OutageArea, WeatherObservation};

/// Time window for gauge readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ReadingWindow {
    /// Midnight of `day` through midnight two days later.
    pub fn starting(day: NaiveDate) -> Self {
        let from = day.and_time(chrono::NaiveTime::MIN).and_utc();
        Self {
            from,
            to: from + Duration::days(2),
        }
    }
}

#[async_trait]
pub trait AirQualitySource: Send + Sync {
    /// Forecast rows near `point`, nearest reporting area first.
    async fn forecast(&self, point: &Coordinate) -> Result<Vec<AqiForecast>, SourceError>;
}

#[async_trait]
pub trait OutageSource: Send + Sync {
    /// Every currently reported outage area (global feed, no filtering).
    async fn outage_areas(&self) -> Result<Vec<OutageArea>, SourceError>;
}

#[async_trait]
pub trait FloodGaugeSource: Send + Sync {
    async fn readings(&self, window: &ReadingWindow) -> Result<Vec<GaugeReading>, SourceError>;
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn observation(&self, point: &Coordinate) -> Result<WeatherObservation, SourceError>;
}

/// Opaque text-in/text-out summarization service.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String, SourceError>;
}
