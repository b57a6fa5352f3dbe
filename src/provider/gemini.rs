//! Google Gemini generateContent wire client.
//!
//! Sends requests to `POST /v1beta/models/{model}:generateContent` with the
//! `x-goog-api-key` header. The REST protocol uses camelCase field names
//! (`systemInstruction`, `generationConfig`), hence the serde renames.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::constants::REQUEST_TIMEOUT;
use crate::error::QueryError;
use crate::options::{self, QueryOptions};

use super::client::{preflight, ProviderClient};
use super::kind::ProviderKind;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request body for generateContent.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

/// A content turn: optional role plus ordered parts. The system instruction
/// carries no role.
#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// One candidate answer. `content` can be absent when generation was
/// blocked, which then reads as zero parts.
#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenates every text part of every candidate in wire order.
fn text_of(response: &GenerateResponse) -> String {
    response
        .candidates
        .iter()
        .flat_map(|candidate| candidate.content.parts.iter())
        .filter_map(|part| part.text.as_deref())
        .collect()
}

// No Debug derive: the api key must never land in logs.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl ProviderClient for GeminiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
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

        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents: prompts
                .iter()
                .map(|p| Content {
                    role: Some("user"),
                    parts: vec![Part { text: p }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: native.temperature,
                max_output_tokens: native.max_tokens,
            },
        };

        let exchange = async {
            let response = self
                .client
                .post(format!("{BASE_URL}/models/{model}:generateContent"))
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(QueryError::Api { status, body });
            }

            let parsed: GenerateResponse = serde_json::from_str(&response.text().await?)?;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> GeminiClient {
        GeminiClient::new("test-key-not-real".to_string()).unwrap()
    }

    #[test]
    fn request_serializes_camel_case_fields() {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: "be brief" }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                temperature: 1.0,
                max_output_tokens: 8192,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "systemInstruction": {"parts": [{"text": "be brief"}]},
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "generationConfig": {"temperature": 1.0, "maxOutputTokens": 8192},
            })
        );
    }

    #[test]
    fn parts_concatenate_across_candidates() {
        let raw = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Hello"}, {"text": ", "}]}},
                {"content": {"parts": [{"text": "world"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(text_of(&parsed), "Hello, world");
    }

    #[test]
    fn blocked_candidates_read_as_empty() {
        let raw = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(text_of(&parsed), "");
    }

    #[tokio::test]
    async fn empty_prompts_fail_before_any_request() {
        let client = make_client();
        let cancel = CancellationToken::new();
        let err = client
            .query_text(&cancel, "sys", &[], "gemini-2.5-flash", QueryOptions::new(50.0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::EmptyPrompt));
    }

    #[tokio::test]
    async fn cancelled_calls_fail_before_any_request() {
        let client = make_client();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let prompts = vec!["hello".to_string()];
        let err = client
            .query_text(&cancel, "sys", &prompts, "gemini-2.5-flash", QueryOptions::new(50.0, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Cancelled));
    }
}
