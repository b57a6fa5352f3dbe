//! Provider kind enumeration.
//!
//! Defines [`ProviderKind`] which identifies which LLM backend serves a
//! model, plus the per-provider facts the rest of the crate needs: display
//! name, credential variable, and native temperature scale.

use std::fmt;

/// Identifies which LLM provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Anthropic (Claude models).
    Anthropic,
    /// DeepSeek (OpenAI-compatible API).
    DeepSeek,
    /// Google Gemini.
    Gemini,
    /// Llama served behind an OpenAI-compatible endpoint.
    Llama,
    /// OpenAI (GPT and o-series models).
    OpenAI,
}

/// Every supported provider, in listing order.
pub const ALL_PROVIDERS: &[ProviderKind] = &[
    ProviderKind::Anthropic,
    ProviderKind::DeepSeek,
    ProviderKind::Gemini,
    ProviderKind::Llama,
    ProviderKind::OpenAI,
];

impl ProviderKind {
    /// Canonical lowercase name, as shown in model listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Llama => "llama",
            ProviderKind::OpenAI => "openai",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::Llama => "LLAMA_API_KEY",
            ProviderKind::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Factor mapping the canonical 0..100 temperature onto this provider's
    /// native range: `native = canonical * scale / 100`.
    pub fn temperature_scale(&self) -> f32 {
        match self {
            ProviderKind::Anthropic => 1.0,
            _ => 2.0,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
