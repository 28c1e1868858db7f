//! Shared application state.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use envwatch_core::{ReportAssembler, Sources, StationCatalog, Summarizer};
use envwatch_feeds::{
    build_client, AirNowClient, ChatSummarizer, GaugeReadingsClient, NwsClient, OutageMapClient,
};

use crate::config::Config;

const SUMMARIZER_TIMEOUT: Duration = Duration::from_secs(120);

pub struct AppState {
    pub assembler: ReportAssembler,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(assembler: ReportAssembler, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            assembler,
            summarizer,
        }
    }

    /// Wire the live upstream clients described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = load_catalog(config)?;
        tracing::info!("Station catalog ready with {} stations", catalog.len());

        let client = build_client(config.fetch_timeout, &config.nws_user_agent)
            .context("Failed to create HTTP client")?;

        let sources = Sources {
            air_quality: Arc::new(
                AirNowClient::new(client.clone(), &config.airnow_url, &config.airnow_api_key)
                    .with_distance_miles(config.airnow_distance_miles),
            ),
            outages: Arc::new(OutageMapClient::new(client.clone(), &config.outage_feed_url)),
            flood_gauges: Arc::new(
                GaugeReadingsClient::new(client.clone(), &config.flood_gauge_url)
                    .with_region_id(config.flood_region_id),
            ),
            weather: Arc::new(NwsClient::new(client, &config.nws_api_url)),
        };
        if config.airnow_api_key.trim().is_empty() {
            tracing::warn!("AIRNOW_API_KEY not set; air quality will always be unknown");
        }

        let summarizer_client = build_client(SUMMARIZER_TIMEOUT, &config.nws_user_agent)
            .context("Failed to create summarizer HTTP client")?;
        let summarizer = ChatSummarizer::new(
            summarizer_client,
            &config.summarizer_url,
            &config.summarizer_model,
        );

        let assembler = ReportAssembler::new(sources, Arc::new(catalog))
            .with_fetch_timeout(config.fetch_timeout);
        Ok(Self::new(assembler, Arc::new(summarizer)))
    }
}

fn load_catalog(config: &Config) -> Result<StationCatalog> {
    let Some(path) = config.station_listing_path.as_ref() else {
        return Ok(StationCatalog::builtin());
    };

    let listing = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read station listing {}", path.display()))?;
    let catalog = StationCatalog::parse(&listing);
    if catalog.is_empty() {
        anyhow::bail!("Station listing {} has no usable stations", path.display());
    }
    tracing::info!("Loaded station listing from {}", path.display());
    Ok(catalog)
}
