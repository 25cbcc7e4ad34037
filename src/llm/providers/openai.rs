//! OpenAI provider implementation
//!
//! Supports OpenAI API and OpenAI-compatible APIs (OpenRouter, OneAPI, etc.)

use crate::error::{GenerationError, Result, ScoutError};
use crate::llm::TextGenerator;
use crate::types::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI provider implementation
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(ScoutError::config("OpenAI API key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ScoutError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Intelligently constructs the full API URL
    fn build_url(&self, endpoint: &str) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        if base_url.ends_with("/v1") {
            format!("{}{}", base_url, endpoint)
        } else {
            format!("{}/v1{}", base_url, endpoint)
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiProvider {
    async fn complete(&self, system: &str, user: &str) -> std::result::Result<String, GenerationError> {
        let request = OpenAiRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: Some(system.to_string()),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: Some(user.to_string()),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = self.build_url("/chat/completions");
        tracing::debug!(provider = "openai", model = %self.model, url = %url, "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::from_status(status.as_u16(), error_text));
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::unexpected(format!("Malformed OpenAI response: {}", e)))?;

        Ok(openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// OpenAI API structures
#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: Option<&str>) -> OpenAiProvider {
        OpenAiProvider::new(&LlmConfig {
            api_key: "test-key".to_string(),
            base_url: base_url.map(str::to_string),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_build_url() {
        assert_eq!(
            provider(None).build_url("/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            provider(Some("https://openrouter.ai/api/")).build_url("/chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_response_with_null_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: OpenAiResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
