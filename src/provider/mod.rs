//! LLM provider abstraction for kawa.
//!
//! Hand-written wire clients behind one shared `ProviderClient` trait,
//! keeping provider-specific protocol details out of the CLI layer. Supports
//! Anthropic, Gemini, and the OpenAI-compatible family (OpenAI, Llama,
//! DeepSeek) via [`ProviderKind`].

mod anthropic;
mod client;
mod gemini;
mod kind;
mod openai;

pub use client::build_client;
pub use kind::{ProviderKind, ALL_PROVIDERS};
