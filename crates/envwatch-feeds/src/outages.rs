//! Utility outage-map feed client.

use async_trait::async_trait;
use envwatch_core::{parse_outage_feed, OutageArea, OutageSource, SourceError};
use reqwest::Client;

use crate::http::{read_json, send_checked};

pub const DEFAULT_OUTAGE_FEED_URL: &str =
    "https://www.pse.com/api/sitecore/OutageMap/AnonymoussMapListView";

const WHAT: &str = "Outage feed";

/// Fetches the full outage map on every call.
pub struct OutageMapClient {
    client: Client,
    url: String,
}

impl OutageMapClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl OutageSource for OutageMapClient {
    async fn outage_areas(&self) -> Result<Vec<OutageArea>, SourceError> {
        let response = send_checked(self.client.get(&self.url), WHAT).await?;
        let payload = read_json(response, WHAT).await?;
        let areas = parse_outage_feed(&payload)?;

        let unusable = areas.iter().filter(|area| area.polygon.is_none()).count();
        if unusable > 0 {
            tracing::warn!("{} of {} outage areas have no usable polygon", unusable, areas.len());
        }
        Ok(areas)
    }
}
