//! Candidate name generation: model first, rules second

use crate::domain::STRIPPED_EXTENSIONS;
use crate::llm::{FallbackGenerator, TextGenerator};
use crate::throttle::Throttle;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// Most candidates returned per call
pub const MAX_CANDIDATES: usize = 10;

/// Fixed instruction sent with every prompt
pub const SYSTEM_INSTRUCTION: &str = "You are a creative branding assistant. Generate exactly 10 short, brandable domain names without extensions. Each name should be on a new line, numbered 1-10.";

/// Where a batch of candidates came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Model,
    Fallback,
}

impl std::fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateSource::Model => write!(f, "model"),
            CandidateSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Candidates plus their origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub names: Vec<String>,
    pub source: CandidateSource,
}

fn numbering_prefix() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\s*").ok()).as_ref()
}

fn extension_suffix() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(&format!(r"(?i)\.({})$", STRIPPED_EXTENSIONS.join("|"))).ok())
        .as_ref()
}

/// Split a model reply into raw candidate lines.
///
/// Leading `N.` numbering is removed; blank lines are dropped.
pub fn parse_candidates(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| {
            let line = line.trim_start();
            let line = match numbering_prefix() {
                Some(re) => re.replace(line, ""),
                None => line.into(),
            };
            line.trim().to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

/// Strip a known extension and anything outside `[A-Za-z0-9-]`, then lowercase
pub fn clean_candidate(raw: &str) -> String {
    let without_ext = match extension_suffix() {
        Some(re) => re.replace(raw, ""),
        None => raw.into(),
    };
    without_ext
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_lowercase()
}

/// Parse, clean, dedupe (keeping first occurrence) and cap a model reply
pub fn extract_names(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    parse_candidates(text)
        .iter()
        .map(|line| clean_candidate(line))
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .take(MAX_CANDIDATES)
        .collect()
}

/// Turns a prompt into candidate names.
///
/// Errors from the model are logged and absorbed: any failure, blank reply or
/// unusable reply switches to [`FallbackGenerator`].
pub struct NameGenerator {
    provider: Arc<dyn TextGenerator>,
    throttle: Arc<dyn Throttle>,
    fallback: FallbackGenerator,
    rng: Mutex<StdRng>,
    delay: Duration,
}

impl NameGenerator {
    /// Create a generator whose fallback shuffles with OS entropy
    pub fn new(provider: Arc<dyn TextGenerator>, throttle: Arc<dyn Throttle>) -> Self {
        Self::with_rng(provider, throttle, StdRng::from_entropy())
    }

    /// Create a generator with a fixed fallback RNG
    pub fn with_rng(provider: Arc<dyn TextGenerator>, throttle: Arc<dyn Throttle>, rng: StdRng) -> Self {
        Self {
            provider,
            throttle,
            fallback: FallbackGenerator::new(MAX_CANDIDATES),
            rng: Mutex::new(rng),
            delay: Duration::from_millis(500),
        }
    }

    /// Set the pause before each model call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Candidate names for `prompt`; may be empty
    pub async fn generate(&self, prompt: &str) -> Vec<String> {
        self.generate_detailed(prompt).await.names
    }

    /// Candidate names for `prompt`, tagged with where they came from
    pub async fn generate_detailed(&self, prompt: &str) -> Generated {
        self.throttle.pause(self.delay).await;

        let start = Instant::now();
        let user = format!("{}. Generate 10 short, brandable domain names (without extensions):", prompt);

        match self.provider.complete(SYSTEM_INSTRUCTION, &user).await {
            Ok(text) if !text.trim().is_empty() => {
                let names = extract_names(&text);
                if !names.is_empty() {
                    tracing::info!(
                        provider = self.provider.name(),
                        model = self.provider.model(),
                        names = names.len(),
                        duration_ms = %start.elapsed().as_millis(),
                        "Model generation completed"
                    );
                    return Generated {
                        names,
                        source: CandidateSource::Model,
                    };
                }
                tracing::warn!(provider = self.provider.name(), "Model reply held no usable names");
            }
            Ok(_) => {
                tracing::warn!(provider = self.provider.name(), "Model returned an empty reply");
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    hint = e.hint(),
                    duration_ms = %start.elapsed().as_millis(),
                    "Model generation failed"
                );
            }
        }

        let names = {
            let mut rng = self.rng.lock();
            self.fallback.generate(prompt, &mut *rng)
        };
        tracing::info!(names = names.len(), "Using fallback names");

        Generated {
            names,
            source: CandidateSource::Fallback,
        }
    }
}
