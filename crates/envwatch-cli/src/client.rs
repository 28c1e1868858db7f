//! HTTP client for the envwatch server API.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use envwatch_core::{Coordinate, EnvironmentalReport};

pub struct EnvwatchClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    response: String,
}

impl EnvwatchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the environmental report for `point`.
    pub async fn report(&self, point: &Coordinate) -> Result<EnvironmentalReport> {
        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("latitude", point.latitude()), ("longitude", point.longitude())])
            .send()
            .await
            .context("Failed to reach envwatch server")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Report request failed: {} {}", status, body));
        }

        response
            .json()
            .await
            .context("Failed to parse environmental report")
    }

    /// Send `prompt` to the summarizer and return its reply.
    pub async fn analyze(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/analyze", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&AnalyzeRequest { prompt })
            .send()
            .await
            .context("Failed to reach envwatch server")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Analyze request failed: {} {}", status, body));
        }

        let reply: AnalyzeResponse = response
            .json()
            .await
            .context("Failed to parse analyze response")?;
        Ok(reply.response)
    }
}
