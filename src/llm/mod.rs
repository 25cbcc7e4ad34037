//! LLM (Large Language Model) integration module
//!
//! Turns a natural-language prompt into candidate names, with a rule-based
//! fallback for when the model is unreachable or unhelpful.

pub mod fallback;
pub mod generator;
pub mod providers;

// Re-export main functionality
pub use fallback::FallbackGenerator;
pub use generator::{CandidateSource, Generated, NameGenerator, MAX_CANDIDATES, SYSTEM_INSTRUCTION};
pub use providers::{available_providers, create_provider};

use crate::error::GenerationError;
use async_trait::async_trait;

/// One-shot chat completion against a generative text API
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a system instruction and a user message, return the reply text
    async fn complete(&self, system: &str, user: &str) -> std::result::Result<String, GenerationError>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Get model name being used
    fn model(&self) -> &str;
}
