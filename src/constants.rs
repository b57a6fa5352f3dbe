//! Centralized constants for kawa.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

use std::time::Duration;

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "kawa";

/// Default LLM model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-6";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Prompt sent when no input arrives from stdin, files, or URLs.
pub const DEFAULT_PROMPT: &str = "Hello";

// --- Temperature ---

/// Lower bound of the provider-independent temperature scale.
pub const MIN_TEMPERATURE: f32 = 0.0;

/// Exclusive upper bound of the provider-independent temperature scale.
pub const MAX_TEMPERATURE: f32 = 100.0;

/// Default temperature on the provider-independent scale.
pub const DEFAULT_TEMPERATURE: f32 = 50.0;

// --- Token limits ---

/// Completion token ceiling for models without a registry entry.
pub const MAX_TOKENS_DEFAULT: u32 = 4096;

// --- Input limits ---

/// Maximum combined size (bytes) of stdin, file, and URL input.
pub const MAX_INPUT_TOTAL_BYTES: usize = 256 * 1024;

// --- Network ---

/// Timeout for a single provider API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Timeout for fetching one URL named on the command line.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Shortest byte length at which an API key is considered plausible.
pub const MIN_API_KEY_LEN: usize = 8;
