//! Domain normalization and availability probing

pub mod lookup;
pub mod probe;
pub mod sanitizer;

// Re-export main functionality
pub use lookup::CommandWhois;
#[cfg(feature = "whois")]
pub use lookup::TcpWhois;
pub use probe::{classify_output, AvailabilityProbe, NOT_REGISTERED_INDICATORS};
pub use sanitizer::NameSanitizer;

use crate::error::Result;
use crate::types::CanonicalDomain;
use async_trait::async_trait;

/// Source of raw registry text for one domain
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Fetch combined output text for `domain`
    async fn lookup(&self, domain: &CanonicalDomain) -> Result<String>;

    /// Get the method name
    fn method_name(&self) -> &'static str;
}

/// Extensions removed from generated names before probing
pub const STRIPPED_EXTENSIONS: &[&str] = &["com", "net", "org", "io"];
