//! Aether configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::llm::LlmError;

/// Main Aether configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model provider configuration
    pub llm: LlmConfig,

    /// Prompt template configuration
    pub prompts: PromptsConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .aether.yml
        let local_config = PathBuf::from(".aether.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/aether/aether.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("aether").join("aether.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Model provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable checked first for the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Environment variable checked when the primary one is unset
    #[serde(rename = "fallback-api-key-env")]
    pub fallback_api_key_env: String,

    /// Model for structured feature output and chat
    #[serde(rename = "pro-model")]
    pub pro_model: String,

    /// Model for routing, daily briefings and factor suggestions
    #[serde(rename = "flash-model")]
    pub flash_model: String,

    /// Request timeout in milliseconds (unset: wait for the transport)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "API_KEY".to_string(),
            fallback_api_key_env: "GEMINI_API_KEY".to_string(),
            pro_model: "gemini-2.5-pro".to_string(),
            flash_model: "gemini-2.5-flash".to_string(),
            timeout_ms: None,
        }
    }
}

impl LlmConfig {
    /// Read the API key from the process environment
    pub fn api_key(&self) -> Result<String, LlmError> {
        self.api_key_from(|name| std::env::var(name).ok())
    }

    /// Resolve the API key through `lookup`: primary variable, then fallback
    ///
    /// Empty values count as unset.
    pub fn api_key_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String, LlmError> {
        [&self.api_key_env, &self.fallback_api_key_env]
            .into_iter()
            .filter_map(|name| lookup(name.as_str()))
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| LlmError::MissingCredential {
                primary: self.api_key_env.clone(),
                fallback: self.fallback_api_key_env.clone(),
            })
    }
}

/// Prompt template configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory searched for `{name}.pmt` overrides before the embedded templates
    pub dir: Option<PathBuf>,
}
