//! Configuration loading and management for websum.
//!
//! Settings come from `websum.toml` with environment variable overrides for
//! sensitive data and deploy-time knobs. Every section has defaults, so the
//! service also runs with no config file at all.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required API key for provider: {0}")]
    MissingApiKey(String),
}

/// LLM backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// LLM provider: "ollama" or "openai"
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier (e.g., "phi4-mini:latest")
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the local Ollama server
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_openai_url")]
    pub openai_url: String,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub openai_key: Option<String>,
}

/// Page fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent sent when fetching pages
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Character budget for page text sent to the model in one call
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default location (websum.toml in cwd or
    /// `~/.config/websum/`), falling back to defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                let mut config = Config::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override file-sourced values from the environment
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api.openai_key = Some(key);
        }
        if let Ok(url) = std::env::var("OLLAMA_BASE_URL") {
            self.agent.ollama_url = url;
        }
        if let Ok(ua) = std::env::var("USER_AGENT") {
            self.fetch.user_agent = ua;
        }
        if let Ok(bind) = std::env::var("WEBSUM_BIND") {
            self.server.bind = bind;
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("websum.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("websum").join("websum.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Get the API key for the configured provider, if one is required
    pub fn api_key(&self) -> Result<Option<&str>, ConfigError> {
        match self.agent.provider.as_str() {
            "openai" => self
                .api
                .openai_key
                .as_deref()
                .map(Some)
                .ok_or_else(|| ConfigError::MissingApiKey("openai".to_string())),
            // Ollama runs locally and needs no key
            _ => Ok(None),
        }
    }
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "phi4-mini:latest".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_openai_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_user_agent() -> String {
    concat!("websum/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_max_content_chars() -> usize {
    24_000
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            ollama_url: default_ollama_url(),
            openai_url: default_openai_url(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            max_content_chars: default_max_content_chars(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}
