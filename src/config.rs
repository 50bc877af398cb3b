//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variables consulted for the credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Default base URL of the remote image service.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Initial session values.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Remote service settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Gemini API key.
    pub gemini: Option<String>,
}

/// Initial session values from the config file.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Model name or alias selected at startup.
    pub model: String,
    /// Aspect ratio selected at startup.
    pub aspect_ratio: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { model: "imagen-4".to_string(), aspect_ratio: "1:1".to_string() }
    }
}

/// Remote service settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the generative-image API.
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string() }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Credential source for the live service: environment first, then this file.
    #[must_use]
    pub fn credential(&self) -> Credential {
        Credential::Environment { fallback: self.keys.gemini.clone() }
    }
}

/// Where the service credential comes from. Resolved on every call.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Read [`API_KEY_ENV_VARS`] at call time, falling back to a configured value.
    Environment {
        /// Value from the config file.
        fallback: Option<String>,
    },
    /// A fixed value, bypassing the environment.
    #[cfg(test)]
    Fixed(Option<String>),
}

impl Credential {
    /// Resolve the credential, treating blank values as absent.
    #[must_use]
    pub fn resolve(&self) -> Option<String> {
        let value = match self {
            Self::Environment { fallback } => API_KEY_ENV_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
                .or_else(|| fallback.clone()),
            #[cfg(test)]
            Self::Fixed(value) => value.clone(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `IMAGE_STUDIO_CONFIG` environment variable
/// 3. `~/.config/image-studio/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("IMAGE_STUDIO_CONFIG") {
        return PathBuf::from(p);
    }

    config_dir().join("config.toml")
}

/// Directory holding the config and preference files.
pub(crate) fn config_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/image-studio")
    } else {
        PathBuf::from(".image-studio")
    }
}
