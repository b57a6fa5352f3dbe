//! Configuration types and path resolution for kawa.
//!
//! Kawa stores its settings as TOML at the platform's XDG config path
//! (e.g. `~/.config/kawa/config.toml` on Linux). Everything in the file is
//! optional; command-line flags override it and built-in defaults fill the
//! rest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{APP_NAME, CONFIG_FILENAME};

/// Root configuration for kawa, deserialized from `config.toml`.
///
/// All fields are optional so kawa can run with sensible defaults when no
/// config file exists.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Model identifier used when `--model` is not given.
    pub model: Option<String>,
    /// Temperature on the 0..100 scale used when `--temperature` is not
    /// given.
    pub temperature: Option<f32>,
}

impl Config {
    /// Returns the platform-specific configuration directory for kawa.
    ///
    /// Returns `~/.config/kawa/` on Linux (`XDG_CONFIG_HOME/kawa`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be
    /// determined.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(APP_NAME);
        Ok(dir)
    }

    /// Returns the full path to the kawa configuration file.
    ///
    /// Returns `~/.config/kawa/config.toml` on Linux.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads the configuration file, falling back to defaults when none
    /// exists. A file that exists but does not parse is an error rather
    /// than a silent fallback.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config: Config = toml::from_str(
            r#"
            model = "gemini-2.5-flash"
            temperature = 70.0
            "#,
        )
        .unwrap();
        assert_eq!(config.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(config.temperature, Some(70.0));
    }

    #[test]
    fn an_empty_file_means_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.model.is_none());
        assert!(config.temperature.is_none());
    }
}
