//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables checked (in order) for the Gemini API key.
pub const API_KEY_ENV_VARS: [&str; 2] = ["MAQAL_GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Directory where markdown, metadata and images are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory holding the few-shot example files (.txt, .md, .json)
    #[serde(default = "default_examples_dir")]
    pub examples_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (for cloud providers)
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint override
    #[serde(default)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_examples_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            examples_dir: default_examples_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load settings from an explicit path, falling back to defaults when absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if !self.llm.api_key.trim().is_empty() {
            return;
        }

        for var in API_KEY_ENV_VARS {
            if let Ok(key) = std::env::var(var) {
                if !key.trim().is_empty() {
                    self.llm.api_key = key;
                    return;
                }
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "maqal", "maqal")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Whether an API key is available without prompting.
    pub fn has_api_key(&self) -> bool {
        !self.llm.api_key.trim().is_empty()
    }
}
