//! Shared request plumbing for the feed clients.

use envwatch_core::SourceError;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;

/// Build the shared HTTP client. `timeout` bounds each request end to end.
pub fn build_client(timeout: Duration, user_agent: &str) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}

/// Send a request and require a success status.
pub(crate) async fn send_checked(
    request: RequestBuilder,
    what: &str,
) -> Result<Response, SourceError> {
    let response = request
        .send()
        .await
        .map_err(|err| SourceError::Unavailable(format!("{what}: {err}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Unavailable(format!(
            "{what} failed: {status} {}",
            truncate_body(&body)
        )));
    }

    Ok(response)
}

pub(crate) async fn read_json(response: Response, what: &str) -> Result<Value, SourceError> {
    let body = read_text(response, what).await?;
    serde_json::from_str(&body)
        .map_err(|err| SourceError::Malformed(format!("{what}: invalid JSON: {err}")))
}

pub(crate) async fn read_text(response: Response, what: &str) -> Result<String, SourceError> {
    response
        .text()
        .await
        .map_err(|err| SourceError::Unavailable(format!("{what}: failed to read body: {err}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
