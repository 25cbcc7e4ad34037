//! LLM provider implementations
//!
//! Each provider is implemented in its own module.

pub mod anthropic;
pub mod openai;

// Re-export providers for easy access
pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

use crate::error::{Result, ScoutError};
use crate::llm::TextGenerator;
use crate::types::LlmConfig;

/// Get available LLM providers
pub fn available_providers() -> Vec<&'static str> {
    vec!["openai", "anthropic"]
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn TextGenerator>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(OpenAiProvider::new(config)?)),
        "anthropic" => Ok(Box::new(AnthropicProvider::new(config)?)),
        _ => Err(ScoutError::config(format!(
            "Unsupported LLM provider: {}. Supported providers: {}",
            config.provider,
            available_providers().join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider() {
        let config = LlmConfig {
            api_key: "test-key".to_string(),
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4.1-nano");

        let config = LlmConfig {
            provider: "anthropic".to_string(),
            model: "claude-3-5-haiku-latest".to_string(),
            api_key: "test-key".to_string(),
            ..Default::default()
        };
        assert_eq!(create_provider(&config).unwrap().name(), "anthropic");
    }

    #[test]
    fn test_rejects_unknown_or_unkeyed() {
        let config = LlmConfig {
            provider: "mystery".to_string(),
            api_key: "k".to_string(),
            ..Default::default()
        };
        assert!(matches!(create_provider(&config), Err(ScoutError::Config { .. })));

        let config = LlmConfig::default();
        assert!(matches!(create_provider(&config), Err(ScoutError::Config { .. })));
    }
}
