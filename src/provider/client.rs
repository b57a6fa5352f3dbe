//! The provider client contract and its environment-driven factory.
//!
//! [`ProviderClient`] is the one seam between the CLI pipeline and the wire
//! clients: validate before any network traffic, honor cancellation while a
//! request is in flight, and reduce the provider's response to one plain
//! string. [`build_client`] picks the implementation for a
//! [`ProviderKind`] and gathers its credentials from the environment.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::constants::MIN_API_KEY_LEN;
use crate::error::QueryError;
use crate::options::QueryOptions;

use super::anthropic::AnthropicClient;
use super::gemini::GeminiClient;
use super::kind::ProviderKind;
use super::openai::{OpenAiCompatClient, OPENAI_BASE_URL};

/// One LLM backend able to answer text queries.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Which backend this client talks to.
    fn kind(&self) -> ProviderKind;

    /// Sends `system` plus the ordered `prompts` to `model` and returns the
    /// concatenated response text.
    ///
    /// Fails before any network traffic when the call is already cancelled,
    /// when `prompts` is empty, or when `options` does not validate.
    async fn query_text(
        &self,
        cancel: &CancellationToken,
        system: &str,
        prompts: &[String],
        model: &str,
        options: QueryOptions,
    ) -> Result<String, QueryError>;

    /// Releases per-client resources. Safe to call exactly once; the default
    /// is a no-op because these transports hold nothing beyond pooled
    /// connections.
    fn close(&mut self) {}
}

/// Pre-network checks shared by every wire client. Individual blocks may be
/// empty (an empty file, say); only a sequence with nothing in it is an error.
pub(super) fn preflight(
    cancel: &CancellationToken,
    prompts: &[String],
) -> Result<(), QueryError> {
    if cancel.is_cancelled() {
        return Err(QueryError::Cancelled);
    }
    if prompts.is_empty() {
        return Err(QueryError::EmptyPrompt);
    }
    Ok(())
}

/// Reads `var` and applies the length plausibility check shared by all API
/// keys. Rejecting implausible keys here keeps doomed requests off the wire.
fn require_api_key(var: &str) -> Result<String, QueryError> {
    let value = std::env::var(var)
        .map_err(|_| QueryError::Configuration(format!("{var} environment variable not set")))?;
    if value.len() < MIN_API_KEY_LEN {
        return Err(QueryError::Configuration(format!(
            "{var} is too short to be a valid API key"
        )));
    }
    Ok(value)
}

fn require_base_url(var: &str) -> Result<String, QueryError> {
    std::env::var(var)
        .map_err(|_| QueryError::Configuration(format!("{var} environment variable not set")))
}

/// Builds the wire client for `kind` from environment credentials.
///
/// No network traffic happens here; a missing or implausible variable fails
/// with [`QueryError::Configuration`] naming it. OpenAI accepts an optional
/// `OPENAI_BASE_URL` override, while the llama and deepseek endpoints are
/// deployment-specific and must be configured explicitly.
pub fn build_client(kind: ProviderKind) -> Result<Box<dyn ProviderClient>, QueryError> {
    match kind {
        ProviderKind::Anthropic => {
            let api_key = require_api_key(kind.api_key_var())?;
            Ok(Box::new(AnthropicClient::new(api_key)?))
        }
        ProviderKind::Gemini => {
            let api_key = require_api_key(kind.api_key_var())?;
            Ok(Box::new(GeminiClient::new(api_key)?))
        }
        ProviderKind::OpenAI => {
            let api_key = require_api_key(kind.api_key_var())?;
            let base_url = std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| OPENAI_BASE_URL.to_string());
            Ok(Box::new(OpenAiCompatClient::new(kind, api_key, base_url)?))
        }
        ProviderKind::Llama => {
            let api_key = require_api_key(kind.api_key_var())?;
            let base_url = require_base_url("LLAMA_BASE_URL")?;
            Ok(Box::new(OpenAiCompatClient::new(kind, api_key, base_url)?))
        }
        ProviderKind::DeepSeek => {
            let api_key = require_api_key(kind.api_key_var())?;
            let base_url = require_base_url("DEEPSEEK_BASE_URL")?;
            Ok(Box::new(OpenAiCompatClient::new(kind, api_key, base_url)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_rejects_an_already_cancelled_call() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let prompts = vec!["hi".to_string()];
        assert!(matches!(
            preflight(&cancel, &prompts),
            Err(QueryError::Cancelled)
        ));
    }

    #[test]
    fn preflight_rejects_only_an_empty_sequence() {
        let cancel = CancellationToken::new();
        assert!(matches!(
            preflight(&cancel, &[]),
            Err(QueryError::EmptyPrompt)
        ));

        // An empty block, as from an empty file, passes through.
        let with_hole = vec!["hi".to_string(), String::new()];
        assert!(preflight(&cancel, &with_hole).is_ok());

        let ok = vec!["hi".to_string()];
        assert!(preflight(&cancel, &ok).is_ok());
    }

    // Environment mutation is process-global, so all factory cases share one
    // test to keep them from racing under the parallel test runner.
    #[test]
    fn factory_reads_credentials_from_the_environment() {
        std::env::remove_var("ANTHROPIC_API_KEY");
        // The Ok side is a boxed trait object without Debug, so take the
        // error out through err() rather than unwrap_err().
        let err = build_client(ProviderKind::Anthropic).err().unwrap();
        assert!(matches!(err, QueryError::Configuration(_)));

        std::env::set_var("ANTHROPIC_API_KEY", "short");
        let err = build_client(ProviderKind::Anthropic).err().unwrap();
        match err {
            QueryError::Configuration(msg) => assert!(msg.contains("ANTHROPIC_API_KEY")),
            other => panic!("expected Configuration, got {other:?}"),
        }

        std::env::set_var("ANTHROPIC_API_KEY", "test-key-not-real");
        let client = build_client(ProviderKind::Anthropic).unwrap();
        assert_eq!(client.kind(), ProviderKind::Anthropic);

        // The deepseek endpoint has no public default and must be set.
        std::env::set_var("DEEPSEEK_API_KEY", "test-key-not-real");
        std::env::remove_var("DEEPSEEK_BASE_URL");
        let err = build_client(ProviderKind::DeepSeek).err().unwrap();
        match err {
            QueryError::Configuration(msg) => assert!(msg.contains("DEEPSEEK_BASE_URL")),
            other => panic!("expected Configuration, got {other:?}"),
        }

        std::env::set_var("DEEPSEEK_BASE_URL", "https://api.deepseek.example/v1");
        let client = build_client(ProviderKind::DeepSeek).unwrap();
        assert_eq!(client.kind(), ProviderKind::DeepSeek);

        // OpenAI falls back to its public endpoint without an override.
        std::env::set_var("OPENAI_API_KEY", "test-key-not-real");
        std::env::remove_var("OPENAI_BASE_URL");
        let client = build_client(ProviderKind::OpenAI).unwrap();
        assert_eq!(client.kind(), ProviderKind::OpenAI);
    }
}
