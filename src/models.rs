//! Centralized model registry for kawa.
//!
//! Defines known models with their providers and completion-token ceilings.
//! This is the single source of truth: alias resolution, provider routing,
//! token budgeting, and the `models` listing all consume from here.

use crate::constants::MAX_TOKENS_DEFAULT;
use crate::error::QueryError;
use crate::provider::ProviderKind;

/// Information about a known LLM model.
pub struct ModelInfo {
    /// The canonical model identifier string (e.g., "claude-sonnet-4-6").
    pub name: &'static str,
    /// Provider that serves this model.
    pub provider: ProviderKind,
    /// Completion token ceiling requested for this model.
    pub max_tokens: u32,
}

/// Every model kawa knows how to route. Grouped by provider.
pub const MODELS: &[ModelInfo] = &[
    // Anthropic
    ModelInfo {
        name: "claude-opus-4-6",
        provider: ProviderKind::Anthropic,
        max_tokens: 32_000,
    },
    ModelInfo {
        name: "claude-sonnet-4-6",
        provider: ProviderKind::Anthropic,
        max_tokens: 8_192,
    },
    ModelInfo {
        name: "claude-sonnet-4-5",
        provider: ProviderKind::Anthropic,
        max_tokens: 8_192,
    },
    ModelInfo {
        name: "claude-haiku-4-5",
        provider: ProviderKind::Anthropic,
        max_tokens: 8_192,
    },
    // OpenAI
    ModelInfo {
        name: "gpt-5.2",
        provider: ProviderKind::OpenAI,
        max_tokens: 16_384,
    },
    ModelInfo {
        name: "gpt-5-mini",
        provider: ProviderKind::OpenAI,
        max_tokens: 16_384,
    },
    ModelInfo {
        name: "gpt-4.1",
        provider: ProviderKind::OpenAI,
        max_tokens: 16_384,
    },
    ModelInfo {
        name: "o3",
        provider: ProviderKind::OpenAI,
        max_tokens: 16_384,
    },
    ModelInfo {
        name: "o4-mini",
        provider: ProviderKind::OpenAI,
        max_tokens: 16_384,
    },
    // Gemini
    ModelInfo {
        name: "gemini-2.5-pro",
        provider: ProviderKind::Gemini,
        max_tokens: 16_384,
    },
    ModelInfo {
        name: "gemini-2.5-flash",
        provider: ProviderKind::Gemini,
        max_tokens: 16_384,
    },
    ModelInfo {
        name: "gemini-2.0-flash",
        provider: ProviderKind::Gemini,
        max_tokens: 8_192,
    },
    // DeepSeek
    ModelInfo {
        name: "deepseek-chat",
        provider: ProviderKind::DeepSeek,
        max_tokens: 8_192,
    },
    ModelInfo {
        name: "deepseek-reasoner",
        provider: ProviderKind::DeepSeek,
        max_tokens: 8_192,
    },
    // Llama
    ModelInfo {
        name: "llama3.3-70b",
        provider: ProviderKind::Llama,
        max_tokens: 8_192,
    },
    ModelInfo {
        name: "llama4-maverick",
        provider: ProviderKind::Llama,
        max_tokens: 8_192,
    },
];

/// Undated shorthand names accepted anywhere a model identifier is.
pub const MODEL_ALIASES: &[(&str, &str)] = &[
    ("claude-haiku", "claude-haiku-4-5"),
    ("claude-opus", "claude-opus-4-6"),
    ("claude-sonnet", "claude-sonnet-4-6"),
    ("deepseek-r1", "deepseek-reasoner"),
    ("deepseek-v3", "deepseek-chat"),
    ("gemini-flash", "gemini-2.5-flash"),
    ("gemini-pro", "gemini-2.5-pro"),
    ("gpt-5", "gpt-5.2"),
];

/// Maps an alias to its canonical model name. Non-alias input (including
/// already-canonical names and unknown strings) passes through unchanged, so
/// resolution is idempotent.
pub fn resolve_alias(name: &str) -> &str {
    MODEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

/// Looks up which provider serves `model`.
///
/// Unlike [`max_tokens_for`], a miss here is fatal: without a provider there
/// is nowhere to send the request.
pub fn provider_for(model: &str) -> Result<ProviderKind, QueryError> {
    MODELS
        .iter()
        .find(|m| m.name == model)
        .map(|m| m.provider)
        .ok_or_else(|| QueryError::UnrecognizedModel(model.to_string()))
}

/// Completion token ceiling for `model`, falling back to
/// [`MAX_TOKENS_DEFAULT`] for models not in the registry.
pub fn max_tokens_for(model: &str) -> u32 {
    MODELS
        .iter()
        .find(|m| m.name == model)
        .map(|m| m.max_tokens)
        .unwrap_or(MAX_TOKENS_DEFAULT)
}

/// All registered models, in registry order.
pub fn all() -> impl Iterator<Item = &'static ModelInfo> {
    MODELS.iter()
}
