//! Domain Scout - LLM-assisted brandable domain discovery
//!
//! Generates candidate names from a category prompt, checks each one with a
//! WHOIS lookup, logs every verdict to CSV and retries with a fresh prompt
//! until something is available or the attempt budget runs out.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod llm;
pub mod scout;
pub mod store;
pub mod throttle;
pub mod types;

// Re-export commonly used types
pub use error::{GenerationError, Result, ScoutError};
pub use types::{
    AvailabilityStatus, CanonicalDomain, LlmConfig, ResultRecord, ScoutOutcome, StoreSummary,
    Verdicts,
};

// Re-export main functionality
pub use catalog::PromptCatalog;
pub use config::{LookupBackend, ScoutConfig};
pub use domain::{AvailabilityProbe, NameSanitizer};
pub use llm::NameGenerator;
pub use scout::{ScoutEvent, ScoutOrchestrator};
pub use store::ResultStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
