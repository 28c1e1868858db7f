//! Server configuration from environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use envwatch_feeds::{airnow, gauges, nws, outages, summarizer};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub fetch_timeout: Duration,
    pub airnow_url: String,
    pub airnow_api_key: String,
    pub airnow_distance_miles: u32,
    pub outage_feed_url: String,
    pub flood_gauge_url: String,
    pub flood_region_id: u32,
    pub nws_api_url: String,
    pub nws_user_agent: String,
    pub summarizer_url: String,
    pub summarizer_model: String,
    /// Replaces the built-in station listing when set.
    pub station_listing_path: Option<PathBuf>,
    pub json_logs: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: parsed("ENVWATCH_PORT").unwrap_or(8002),
            fetch_timeout: Duration::from_millis(
                parsed("ENVWATCH_FETCH_TIMEOUT_MS").unwrap_or(5000),
            ),
            airnow_url: string_or("AIRNOW_URL", airnow::DEFAULT_AIRNOW_URL),
            airnow_api_key: env::var("AIRNOW_API_KEY").unwrap_or_default(),
            airnow_distance_miles: parsed("AIRNOW_DISTANCE_MILES")
                .unwrap_or(airnow::DEFAULT_DISTANCE_MILES),
            outage_feed_url: string_or("OUTAGE_FEED_URL", outages::DEFAULT_OUTAGE_FEED_URL),
            flood_gauge_url: string_or("FLOOD_GAUGE_URL", gauges::DEFAULT_FLOOD_GAUGE_URL),
            flood_region_id: parsed("FLOOD_REGION_ID").unwrap_or(gauges::DEFAULT_REGION_ID),
            nws_api_url: string_or("NWS_API_URL", nws::DEFAULT_NWS_API_URL),
            nws_user_agent: env::var("NWS_USER_AGENT")
                .unwrap_or_else(|_| concat!("envwatch/", env!("CARGO_PKG_VERSION")).to_string()),
            summarizer_url: string_or("SUMMARIZER_URL", summarizer::DEFAULT_SUMMARIZER_URL),
            summarizer_model: string_or("SUMMARIZER_MODEL", summarizer::DEFAULT_SUMMARIZER_MODEL),
            station_listing_path: env::var("STATION_LISTING_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            json_logs: env::var("ENVWATCH_LOG_FORMAT")
                .map(|s| s.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }
}

fn string_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
