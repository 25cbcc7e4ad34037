//! Runtime configuration
//!
//! Environment lookups happen here and only here; everything downstream gets
//! an explicit [`ScoutConfig`].

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, ScoutError};
use crate::types::LlmConfig;

/// Which lookup backend the probe uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupBackend {
    /// Run an external whois-compatible program
    Command { program: String },
    /// Query registry WHOIS servers over TCP/43
    Tcp,
}

impl Default for LookupBackend {
    fn default() -> Self {
        Self::Command {
            program: "whois".to_string(),
        }
    }
}

impl LookupBackend {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "command" | "whois" => Ok(Self::default()),
            "tcp" => Ok(Self::Tcp),
            other => Err(ScoutError::config(format!(
                "Unknown lookup backend '{}'. Use 'command' or 'tcp'",
                other
            ))),
        }
    }
}

/// Everything a scouting run needs
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    pub llm: LlmConfig,
    pub prompts_path: PathBuf,
    pub results_path: PathBuf,
    pub lookup: LookupBackend,
    pub max_retries: usize,
    pub probe_delay: Duration,
    pub generation_delay: Duration,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            prompts_path: PathBuf::from("prompts.yml"),
            results_path: PathBuf::from("results.csv"),
            lookup: LookupBackend::default(),
            max_retries: 3,
            probe_delay: Duration::from_secs(1),
            generation_delay: Duration::from_millis(500),
        }
    }
}

impl ScoutConfig {
    /// Build from process environment (after `.env` has been loaded)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.llm = if let Some(api_key) = get("OPENAI_API_KEY") {
            LlmConfig {
                provider: "openai".to_string(),
                model: get("OPENAI_MODEL").unwrap_or_else(|| config.llm.model.clone()),
                api_key,
                base_url: get("OPENAI_BASE_URL"),
                ..LlmConfig::default()
            }
        } else if let Some(api_key) = get("ANTHROPIC_API_KEY") {
            LlmConfig {
                provider: "anthropic".to_string(),
                model: get("ANTHROPIC_MODEL").unwrap_or_else(|| "claude-3-5-haiku-latest".to_string()),
                api_key,
                base_url: get("ANTHROPIC_BASE_URL"),
                ..LlmConfig::default()
            }
        } else {
            return Err(crate::config_error!(
                "No LLM credentials configured. Set OPENAI_API_KEY (or ANTHROPIC_API_KEY) in .env"
            ));
        };

        if let Some(path) = get("SCOUT_PROMPTS") {
            config.prompts_path = PathBuf::from(path);
        }
        if let Some(path) = get("SCOUT_RESULTS") {
            config.results_path = PathBuf::from(path);
        }
        if let Some(backend) = get("SCOUT_WHOIS") {
            config.lookup = LookupBackend::parse(&backend)?;
        }
        if let Some(retries) = get("SCOUT_MAX_RETRIES") {
            config.max_retries = retries
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| crate::config_error!("SCOUT_MAX_RETRIES must be a positive integer, got '{}'", retries))?;
        }

        Ok(config)
    }
}
