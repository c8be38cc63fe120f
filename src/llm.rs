//! Chat-completion client for the configured LLM backend.
//!
//! Two providers are supported: a local Ollama server (the default, no key)
//! and an OpenAI-compatible hosted endpoint selected by API key.

use crate::config::{Config, ConfigError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sampling temperature for all calls
const TEMPERATURE: f32 = 0.1;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("LLM returned an empty response")]
    EmptyResponse,
}

/// Which backend serves chat completions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    OpenAi,
}

/// Parse a provider string from config
fn parse_provider(provider: &str) -> Provider {
    match provider {
        "openai" => Provider::OpenAi,
        _ => Provider::Ollama, // Default
    }
}

/// A configured chat-completion client
pub struct LlmClient {
    http: Client,
    provider: Provider,
    model: String,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: ResponseMessage,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl LlmClient {
    /// Build the client from configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let provider = parse_provider(&config.agent.provider);
        let api_key = config.api_key()?.map(|k| k.to_string());
        let base_url = match provider {
            Provider::Ollama => &config.agent.ollama_url,
            Provider::OpenAi => &config.agent.openai_url,
        };

        Ok(Self {
            http: Client::new(),
            provider,
            model: config.agent.model.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Run one chat completion and return the assistant's text
    pub async fn chat(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let messages = vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ];

        let text = match self.provider {
            Provider::Ollama => self.chat_ollama(messages).await?,
            Provider::OpenAi => self.chat_openai(messages).await?,
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }

    async fn chat_ollama(&self, messages: Vec<ChatMessage<'_>>) -> Result<String, LlmError> {
        let request = OllamaRequest {
            model: &self.model,
            messages,
            stream: false,
            options: OllamaOptions {
                temperature: TEMPERATURE,
            },
        };

        let response: OllamaResponse = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.message.content)
    }

    async fn chat_openai(&self, messages: Vec<ChatMessage<'_>>) -> Result<String, LlmError> {
        let request = OpenAiRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
        };

        let mut builder = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url));
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response: OpenAiResponse = builder
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_defaults_to_ollama() {
        assert_eq!(parse_provider("ollama"), Provider::Ollama);
        assert_eq!(parse_provider("openai"), Provider::OpenAi);
        assert_eq!(parse_provider("something-else"), Provider::Ollama);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut config = Config::default();
        config.agent.ollama_url = "http://localhost:11434/".to_string();
        let client = LlmClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn ollama_request_shape_matches_the_wire_format() {
        let request = OllamaRequest {
            model: "phi4-mini:latest",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            stream: false,
            options: OllamaOptions {
                temperature: TEMPERATURE,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "phi4-mini:latest");
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "user");
        assert!(value["options"]["temperature"].is_number());
    }
}
