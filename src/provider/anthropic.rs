//! Anthropic Messages API wire client.
//!
//! Sends requests to `POST /v1/messages` with the `x-api-key` and
//! `anthropic-version` headers and reduces the response's content blocks to
//! one string. Non-text blocks are tolerated but contribute nothing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::constants::REQUEST_TIMEOUT;
use crate::error::QueryError;
use crate::options::{self, QueryOptions};

use super::client::{preflight, ProviderClient};
use super::kind::ProviderKind;

const BASE_URL: &str = "https://api.anthropic.com";

/// The Anthropic API version header value.
const API_VERSION: &str = "2023-06-01";

/// Request body for the Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

/// A single conversation turn.
#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body, reduced to what the text pipeline needs.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// A content block in a Messages response.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    /// Tool use, thinking, and any future block types.
    #[serde(other)]
    Other,
}

/// Concatenates the text blocks of a response in wire order.
fn text_of(response: &MessagesResponse) -> String {
    response
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
        .collect()
}

// No Debug derive: the api key must never land in logs.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl ProviderClient for AnthropicClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn query_text(
        &self,
        cancel: &CancellationToken,
        system: &str,
        prompts: &[String],
        model: &str,
        options: QueryOptions,
    ) -> Result<String, QueryError> {
        preflight(cancel, prompts)?;
        let native = options::normalize(options, self.kind())?;

        let body = MessagesRequest {
            model,
            max_tokens: native.max_tokens,
            temperature: native.temperature,
            system,
            messages: prompts
                .iter()
                .map(|p| Message {
                    role: "user",
                    content: p,
                })
                .collect(),
        };

        let exchange = async {
            let response = self
                .client
                .post(format!("{BASE_URL}/v1/messages"))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", API_VERSION)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(QueryError::Api { status, body });
            }

            let parsed: MessagesResponse = serde_json::from_str(&response.text().await?)?;
            Ok::<_, QueryError>(parsed)
        };

        let parsed = tokio::select! {
            _ = cancel.cancelled() => return Err(QueryError::Cancelled),
            result = exchange => result?,
        };

        let content = text_of(&parsed);
        if content.is_empty() {
            return Err(QueryError::EmptyResponse);
        }
        Ok(content)
    }
}
