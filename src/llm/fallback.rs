//! Rule-based name generator used when the model gives us nothing
//!
//! Names are built by gluing prompt keywords to small themed vocabularies.
//! Output is fully determined by the prompt and the RNG state.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Shortest name the fallback will emit
pub const MIN_NAME_LEN: usize = 6;
/// Longest name the fallback will emit
pub const MAX_NAME_LEN: usize = 18;

const MAX_KEYWORDS: usize = 6;
const THEME_SAMPLE: usize = 4;
const TECH_SAMPLE: usize = 3;

/// Filler words that never make good keywords
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "are", "from", "your", "you",
    "can", "will", "have", "has", "into", "about", "what", "who", "how",
    "generate", "names", "name", "domain", "domains", "brandable", "short",
    "extensions", "without", "catchy", "brand", "brands",
];

const SPORTS_TRIGGERS: &[&str] = &[
    "sport", "sports", "fitness", "athlete", "athletes", "training", "team",
    "teams", "coach", "coaching", "game", "games", "runners", "soccer", "gym",
];

const AI_TRIGGERS: &[&str] = &[
    "ai", "automation", "machine", "learning", "bot", "bots", "intelligence",
    "agent", "agents", "data", "neural", "model",
];

const SPORTS_WORDS: &[&str] = &[
    "play", "goal", "pace", "sprint", "score", "arena", "field", "rally",
    "stride", "peak", "league", "pitch",
];

const AI_WORDS: &[&str] = &[
    "mind", "neural", "logic", "sense", "cortex", "brain", "agent", "auto",
    "cogni", "synth", "vector", "spark",
];

const GENERIC_WORDS: &[&str] = &[
    "hub", "nest", "spark", "wave", "flow", "nova", "bloom", "forge", "loop",
    "craft", "pulse", "orbit",
];

const TECH_WORDS: &[&str] = &[
    "ai", "io", "labs", "tech", "bit", "byte", "sync", "cloud", "stack", "app",
];

const SUFFIXES: &[&str] = &[
    "ly", "ify", "hub", "lab", "go", "zone", "hq", "now", "365", "x",
];

/// Vocabulary family chosen from the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Sports,
    Ai,
    Generic,
}

impl Theme {
    /// Pick a theme by matching prompt words against trigger lists
    pub fn detect(prompt: &str) -> Self {
        let lower = prompt.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| !c.is_ascii_alphabetic())
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.iter().any(|t| SPORTS_TRIGGERS.contains(t)) {
            Theme::Sports
        } else if tokens.iter().any(|t| AI_TRIGGERS.contains(t)) {
            Theme::Ai
        } else {
            Theme::Generic
        }
    }

    pub fn words(&self) -> &'static [&'static str] {
        match self {
            Theme::Sports => SPORTS_WORDS,
            Theme::Ai => AI_WORDS,
            Theme::Generic => GENERIC_WORDS,
        }
    }
}

/// Lowercase ASCII-alphabetic tokens of length ≥ 3, minus stopwords, in
/// first-seen order
pub fn extract_keywords(prompt: &str) -> Vec<String> {
    let lower = prompt.to_lowercase();
    let mut seen = HashSet::new();
    lower
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|t| t.len() >= 3 && !STOPWORDS.contains(t))
        .filter(|t| seen.insert(*t))
        .map(str::to_string)
        .collect()
}

fn is_acceptable(name: &str) -> bool {
    (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Deterministic (given the RNG) candidate producer
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    limit: usize,
}

impl FallbackGenerator {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Produce up to `limit` unique names derived from `prompt`
    pub fn generate<R: Rng + ?Sized>(&self, prompt: &str, rng: &mut R) -> Vec<String> {
        let keywords: Vec<String> = extract_keywords(prompt).into_iter().take(MAX_KEYWORDS).collect();
        let theme = Theme::detect(prompt);
        let words: Vec<&str> = theme.words().choose_multiple(rng, THEME_SAMPLE).copied().collect();
        let techs: Vec<&str> = TECH_WORDS.choose_multiple(rng, TECH_SAMPLE).copied().collect();

        let mut pool = Vec::new();

        for kw in &keywords {
            for word in &words {
                let suffix = SUFFIXES.choose(rng).copied().unwrap_or("ly");
                pool.push(format!("{kw}{word}{suffix}"));
                pool.push(format!("{word}{kw}x"));
                pool.push(format!("{kw}{word}24"));
            }
            for tech in &techs {
                pool.push(format!("{kw}{tech}pro"));
                pool.push(format!("my{kw}{tech}"));
            }
        }

        for (i, first) in keywords.iter().enumerate() {
            for second in &keywords[i + 1..] {
                pool.push(format!("{first}{second}"));
                pool.push(format!("{first}{second}2024"));
                pool.push(format!("get{first}{second}"));
                pool.push(format!("{first}{second}pro"));
            }
        }

        for kw in &keywords {
            pool.push(format!("{kw}verse"));
            pool.push(format!("{kw}fy2024"));
            pool.push(format!("smart{kw}"));
            pool.push(format!("{kw}genie"));
            pool.push(format!("{kw}wizard"));
        }

        let mut seen = HashSet::new();
        let mut names: Vec<String> = pool
            .into_iter()
            .filter(|name| is_acceptable(name))
            .filter(|name| seen.insert(name.clone()))
            .collect();

        names.shuffle(rng);
        names.truncate(self.limit);

        tracing::debug!(
            theme = ?theme,
            keywords = keywords.len(),
            produced = names.len(),
            "Fallback generation completed"
        );

        names
    }
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new(10)
    }
}
