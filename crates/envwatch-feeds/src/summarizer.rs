//! Chat-completions summarizer client (OpenAI-compatible wire format).

use async_trait::async_trait;
use envwatch_core::{SourceError, Summarizer};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::http::{read_json, send_checked};

pub const DEFAULT_SUMMARIZER_URL: &str = "http://localhost:8321/v1/openai/v1";
pub const DEFAULT_SUMMARIZER_MODEL: &str = "llama3.2:3b";

pub const SUMMARY_INSTRUCTIONS: &str = "You will be given a prompt with weather information. \
You will need to analyze the weather information and provide a summary of the weather in the prompt. \
Keep it short and concise.";

const WHAT: &str = "Summarizer";

pub struct ChatSummarizer {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl ChatSummarizer {
    pub fn new(client: Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String, SourceError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SUMMARY_INSTRUCTIONS,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            stream: false,
        };

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        let response = send_checked(request, WHAT).await?;
        let payload = read_json(response, WHAT).await?;

        let reply: ChatResponse = serde_json::from_value(payload)
            .map_err(|err| SourceError::Malformed(format!("{WHAT}: {err}")))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SourceError::Malformed(format!("{WHAT}: response had no content")))
    }
}
