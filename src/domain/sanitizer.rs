//! Candidate name normalization

use crate::types::CanonicalDomain;
use regex::Regex;
use std::sync::OnceLock;

/// Shape every canonical domain must match
pub const CANONICAL_DOMAIN_PATTERN: &str = r"^[a-z0-9-]+\.[a-z]+$";

/// Extension appended to bare labels
pub const DEFAULT_TLD: &str = "com";

const SCHEMES: &[&str] = &["https://", "http://"];

fn canonical_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(CANONICAL_DOMAIN_PATTERN).ok())
        .as_ref()
}

/// Turns raw candidate strings into `label.tld` domains.
///
/// Rejection is a classification, not an error: callers get `None` and drop
/// the candidate.
#[derive(Debug, Clone, Default)]
pub struct NameSanitizer;

impl NameSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize `raw` into a canonical domain.
    ///
    /// Trims, strips an `http(s)://` scheme and a `www.` label, cuts at the
    /// first `/`, lowercases and appends `.com` when no extension is present.
    pub fn sanitize(&self, raw: &str) -> Option<CanonicalDomain> {
        let mut domain = raw.trim();

        for scheme in SCHEMES {
            if let Some(rest) = strip_prefix_ignore_case(domain, scheme) {
                domain = rest;
                break;
            }
        }

        if let Some(rest) = strip_prefix_ignore_case(domain, "www.") {
            domain = rest;
        }

        let domain = domain.split('/').next().unwrap_or_default();
        if domain.is_empty() {
            return None;
        }

        let mut domain = domain.to_lowercase();
        if !domain.contains('.') {
            domain.push('.');
            domain.push_str(DEFAULT_TLD);
        }

        let pattern = canonical_pattern()?;
        if !pattern.is_match(&domain) {
            tracing::trace!(raw = %raw, normalized = %domain, "Rejected candidate name");
            return None;
        }

        Some(CanonicalDomain::new_unchecked(domain))
    }

    pub fn is_valid(&self, raw: &str) -> bool {
        self.sanitize(raw).is_some()
    }
}

fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&input[prefix.len()..])
    } else {
        None
    }
}
