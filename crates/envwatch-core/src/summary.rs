//! Human-readable one-line summaries for flood and weather data.
//!
//! These lines are what operators and the summarizer prompt see. Parsing is
//! tolerant: a missing or garbled segment becomes `None`, never an error.

use std::collections::BTreeSet;
use std::fmt;

use crate::models::{FloodRisk, WeatherObservation};

const DISTANCE_LABEL: &str = "Distance from Flood Monitoring Station: ";
const LEVEL_LABEL: &str = "Current Flood Level: ";
const TREND_LABEL: &str = "Level Trend: ";

const CONDITIONS_LABEL: &str = "Weathers include: ";
const TEMPERATURE_LABEL: &str = "and the temperature is ";

/// Placeholder providers emit for "no value".
const NONE_PLACEHOLDER: &str = "None";

impl fmt::Display for FloodRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.distance_km {
            Some(distance) => write!(f, "{DISTANCE_LABEL}{distance:.2} kilometers")?,
            None => write!(f, "{DISTANCE_LABEL}{NONE_PLACEHOLDER}")?,
        }
        write!(
            f,
            ", {LEVEL_LABEL}{}, {TREND_LABEL}{}",
            self.current_level.as_deref().unwrap_or(NONE_PLACEHOLDER),
            self.trend.as_deref().unwrap_or(NONE_PLACEHOLDER),
        )
    }
}

impl FloodRisk {
    /// Parse a line produced by the `Display` impl (station identity is not part of it).
    pub fn from_summary_line(line: &str) -> Self {
        let mut risk = FloodRisk::default();
        for segment in line.split(", ") {
            let segment = segment.trim();
            if let Some(rest) = segment.strip_prefix(DISTANCE_LABEL) {
                risk.distance_km = rest
                    .split_whitespace()
                    .next()
                    .and_then(|value| value.parse::<f64>().ok())
                    .filter(|value| value.is_finite());
            } else if let Some(rest) = segment.strip_prefix(LEVEL_LABEL) {
                risk.current_level = placeholder_to_none(rest);
            } else if let Some(rest) = segment.strip_prefix(TREND_LABEL) {
                risk.trend = placeholder_to_none(rest);
            }
        }
        risk
    }
}

impl fmt::Display for WeatherObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(CONDITIONS_LABEL)?;
        for condition in &self.conditions {
            write!(f, "{condition}, ")?;
        }
        f.write_str(TEMPERATURE_LABEL)?;
        match self.temperature_celsius {
            Some(celsius) => write!(f, "{celsius}"),
            None => f.write_str(NONE_PLACEHOLDER),
        }
    }
}

impl WeatherObservation {
    /// Parse `Weathers include: <a>, <b>, and the temperature is <c>`.
    ///
    /// Labels are deduplicated and the `None` placeholder is dropped.
    pub fn from_summary_line(line: &str) -> Self {
        let (conditions_part, temperature_part) = match line.split_once(TEMPERATURE_LABEL) {
            Some((conditions, temperature)) => (conditions, Some(temperature)),
            None => (line, None),
        };

        let conditions_part = conditions_part
            .trim_start()
            .strip_prefix(CONDITIONS_LABEL)
            .unwrap_or(conditions_part);

        let conditions: BTreeSet<String> = conditions_part
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty() && *label != NONE_PLACEHOLDER)
            .map(str::to_string)
            .collect();

        let temperature_celsius = temperature_part
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite());

        WeatherObservation {
            conditions,
            temperature_celsius,
        }
    }
}

fn placeholder_to_none(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty() && value != NONE_PLACEHOLDER).then(|| value.to_string())
}
