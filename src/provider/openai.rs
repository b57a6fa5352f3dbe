//! Chat-completions wire client for OpenAI and OpenAI-compatible backends.
//!
//! One implementation serves the `openai`, `llama`, and `deepseek` provider
//! ids; they speak the same `POST {base}/chat/completions` protocol and
//! differ only in endpoint and credentials.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::constants::REQUEST_TIMEOUT;
use crate::error::QueryError;
use crate::options::{self, QueryOptions};

use super::client::{preflight, ProviderClient};
use super::kind::ProviderKind;

/// Public OpenAI endpoint, used when no override is configured.
pub(super) const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Request body for the chat completions API.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

/// Assistant turn inside a choice. `content` is null for tool-call turns.
#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Concatenates the content of every choice in wire order.
fn text_of(response: &ChatResponse) -> String {
    response
        .choices
        .iter()
        .filter_map(|choice| choice.message.content.as_deref())
        .collect()
}

// No Debug derive: the api key must never land in logs.
pub struct OpenAiCompatClient {
    kind: ProviderKind,
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiCompatClient {
    pub fn new(kind: ProviderKind, api_key: String, base_url: String) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            kind,
            client,
            api_key,
            base_url,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ProviderClient for OpenAiCompatClient {
    fn kind(&self) -> ProviderKind {
        self.kind
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

        let mut messages = Vec::with_capacity(prompts.len() + 1);
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
        messages.extend(prompts.iter().map(|p| ChatMessage {
            role: "user",
            content: p,
        }));

        let body = ChatRequest {
            model,
            messages,
            temperature: native.temperature,
            max_tokens: native.max_tokens,
        };

        let exchange = async {
            let response = self
                .client
                .post(self.url())
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(QueryError::Api { status, body });
            }

            let parsed: ChatResponse = serde_json::from_str(&response.text().await?)?;
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
