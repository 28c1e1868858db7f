//! Environmental context block for the summarization assistant.

use crate::models::{Coordinate, EnvironmentalReport};

/// Assistant persona the prompt is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantMode {
    #[default]
    Disaster,
    FirstAid,
    Mental,
}

impl AssistantMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantMode::Disaster => "DISASTER",
            AssistantMode::FirstAid => "FIRSTAID",
            AssistantMode::Mental => "MENTAL",
        }
    }
}

const UNKNOWN: &str = "Unknown";

impl EnvironmentalReport {
    /// Multi-line "Current Environmental Status" summary of the report.
    pub fn status_context(&self, location: Option<&Coordinate>) -> String {
        let location = location
            .map(|c| format!("{:.4}, {:.4}", c.latitude(), c.longitude()))
            .unwrap_or_else(|| "Location data not available".to_string());

        let aqi = self
            .air_quality
            .aqi
            .map(|v| v.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let category = self
            .air_quality
            .category
            .map(|c| c.as_str())
            .unwrap_or(UNKNOWN);

        let flood_level = self.flood_risk.current_level.as_deref().unwrap_or(UNKNOWN);
        let flood_trend = self.flood_risk.trend.as_deref().unwrap_or(UNKNOWN);
        let distance = self
            .flood_risk
            .distance_km
            .map(|d| format!("{d:.1} km"))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let power = match self.power_outage {
            Some(true) => "Outage",
            Some(false) => "Normal",
            None => UNKNOWN,
        };

        let conditions = if self.weather.conditions.is_empty() {
            UNKNOWN.to_string()
        } else {
            self.weather
                .conditions
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let celsius = self
            .weather
            .temperature_celsius
            .map(|c| format!("{:.0}", c.round()))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let fahrenheit = self
            .weather
            .temperature_fahrenheit
            .map(|f| f.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        format!(
            "Current Environmental Status:\n\
             - Location: {location}\n\
             - Air Quality: **{aqi}** ({category})\n\
             - Flood Risk: **{flood_level}** ({flood_trend})\n  \
             Distance from station: {distance}\n\
             - Power Status: **{power}**\n\
             - Weather: **{conditions}**\n  \
             Temperature: {celsius}°C ({fahrenheit}°F)\n\
             - Last Updated: {}\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }
}

/// Full assistant prompt: mode header, environmental context, user message.
pub fn compose_prompt(mode: AssistantMode, context: &str, message: &str) -> String {
    format!(
        "MODE: {} ASSISTANT \n\n{}\n\nUser Message: {}",
        mode.as_str(),
        context.trim_end(),
        message
    )
}
