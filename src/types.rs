//! Core types and structures for domain-scout

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::NameSanitizer;
use crate::error::ScoutError;

/// Domain availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Available,
    Taken,
}

impl AvailabilityStatus {
    pub fn from_available(available: bool) -> Self {
        if available {
            Self::Available
        } else {
            Self::Taken
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Value written to the `status` column of the results file
    pub fn as_record(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Taken => "taken",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Taken => write!(f, "taken"),
        }
    }
}

/// A normalized `label.tld` domain.
///
/// Only [`crate::domain::NameSanitizer`] constructs these. Deserializing
/// goes through the sanitizer too and rejects anything not already canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CanonicalDomain(String);

impl CanonicalDomain {
    pub(crate) fn new_unchecked(domain: String) -> Self {
        Self(domain)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Second-level label (everything before the final dot)
    pub fn label(&self) -> &str {
        self.0.rsplit_once('.').map_or(self.0.as_str(), |(label, _)| label)
    }

    pub fn tld(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(_, tld)| tld)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CanonicalDomain> for String {
    fn from(domain: CanonicalDomain) -> Self {
        domain.0
    }
}

impl TryFrom<String> for CanonicalDomain {
    type Error = ScoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match NameSanitizer::new().sanitize(&value) {
            Some(domain) if domain.as_str() == value => Ok(domain),
            _ => Err(ScoutError::validation(format!("'{}' is not a canonical domain", value))),
        }
    }
}

impl PartialEq<&str> for CanonicalDomain {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered domain → availability mapping produced by one probe batch.
///
/// Iteration follows first-insertion order. Re-inserting a domain updates
/// its verdict in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdicts {
    entries: Vec<(CanonicalDomain, bool)>,
}

impl Verdicts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, domain: CanonicalDomain, available: bool) {
        match self.entries.iter_mut().find(|(d, _)| *d == domain) {
            Some(entry) => entry.1 = available,
            None => self.entries.push((domain, available)),
        }
    }

    pub fn get(&self, domain: &str) -> Option<bool> {
        self.entries
            .iter()
            .find(|(d, _)| d.as_str() == domain)
            .map(|(_, available)| *available)
    }

    pub fn contains(&self, domain: &CanonicalDomain) -> bool {
        self.entries.iter().any(|(d, _)| d == domain)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalDomain, bool)> {
        self.entries.iter().map(|(d, available)| (d, *available))
    }

    pub fn available_count(&self) -> usize {
        self.entries.iter().filter(|(_, available)| *available).count()
    }

    /// Available domains in probe order
    pub fn available(&self) -> Vec<CanonicalDomain> {
        self.entries
            .iter()
            .filter(|(_, available)| *available)
            .map(|(d, _)| d.clone())
            .collect()
    }
}

impl FromIterator<(CanonicalDomain, bool)> for Verdicts {
    fn from_iter<I: IntoIterator<Item = (CanonicalDomain, bool)>>(iter: I) -> Self {
        let mut verdicts = Verdicts::new();
        for (domain, available) in iter {
            verdicts.insert(domain, available);
        }
        verdicts
    }
}

/// One persisted row of the results file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub domain: String,
    pub status: AvailabilityStatus,
    pub prompt_category: String,
    pub prompt_text: String,
    pub checked_at: String,
}

/// Aggregate view of the results file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSummary {
    /// The results file has never been written
    NoData,
    Counts { total: usize, available: usize },
}

impl fmt::Display for StoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreSummary::NoData => write!(f, "No results file found"),
            StoreSummary::Counts { total, available } => {
                write!(f, "Total domains checked: {}, Available: {}", total, available)
            }
        }
    }
}

/// Terminal state of a scouting run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoutOutcome {
    /// The first attempt that found something; `available` holds only that
    /// attempt's domains
    Success {
        attempts: usize,
        available: Vec<CanonicalDomain>,
    },
    /// Every attempt was used without finding an available domain
    Exhausted { attempts: usize },
}

impl ScoutOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn attempts(&self) -> usize {
        match self {
            Self::Success { attempts, .. } | Self::Exhausted { attempts } => *attempts,
        }
    }

    pub fn available(&self) -> &[CanonicalDomain] {
        match self {
            Self::Success { available, .. } => available,
            Self::Exhausted { .. } => &[],
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-nano".to_string(),
            api_key: String::new(),
            base_url: None,
            temperature: 0.8,
            max_tokens: 150,
        }
    }
}
