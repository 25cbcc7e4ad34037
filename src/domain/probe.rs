//! Availability probing and classification

use crate::domain::{NameSanitizer, WhoisLookup};
use crate::throttle::Throttle;
use crate::types::{CanonicalDomain, Verdicts};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Phrases registries use for names nobody holds
pub const NOT_REGISTERED_INDICATORS: &[&str] = &[
    "no match",
    "not found",
    "no data found",
    "domain not found",
    "no matching record",
    "not registered",
    "available for registration",
];

/// Classify raw lookup text. Empty output counts as taken.
pub fn classify_output(output: &str) -> bool {
    let output = output.to_lowercase();
    if output.trim().is_empty() {
        return false;
    }
    NOT_REGISTERED_INDICATORS
        .iter()
        .any(|indicator| output.contains(indicator))
}

/// Checks candidate names one by one against a [`WhoisLookup`].
///
/// Failures never escape: a domain whose lookup errors is recorded as taken.
pub struct AvailabilityProbe {
    lookup: Arc<dyn WhoisLookup>,
    throttle: Arc<dyn Throttle>,
    sanitizer: NameSanitizer,
    delay: Duration,
}

impl AvailabilityProbe {
    pub fn new(lookup: Arc<dyn WhoisLookup>, throttle: Arc<dyn Throttle>) -> Self {
        Self {
            lookup,
            throttle,
            sanitizer: NameSanitizer::new(),
            delay: Duration::from_secs(1),
        }
    }

    /// Set the pause between consecutive probes
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Probe a single canonical domain
    pub async fn check_one(&self, domain: &CanonicalDomain) -> bool {
        let start = Instant::now();
        match self.lookup.lookup(domain).await {
            Ok(output) => {
                let available = classify_output(&output);
                tracing::debug!(
                    domain = %domain,
                    method = self.lookup.method_name(),
                    available,
                    duration_ms = %start.elapsed().as_millis(),
                    "Domain check completed"
                );
                available
            }
            Err(e) => {
                tracing::warn!(
                    domain = %domain,
                    method = self.lookup.method_name(),
                    error = %e,
                    "Domain check failed, assuming taken"
                );
                false
            }
        }
    }

    /// Check every name, in order, skipping ones that do not sanitize
    pub async fn check_all(&self, names: &[String]) -> Verdicts {
        self.check_all_with(names, |_, _| {}).await
    }

    /// Like [`check_all`](Self::check_all), reporting each verdict as it lands
    pub async fn check_all_with<F>(&self, names: &[String], mut on_verdict: F) -> Verdicts
    where
        F: FnMut(&CanonicalDomain, bool),
    {
        let batch_start = Instant::now();
        let throttled = names.len() > 1;
        let mut verdicts = Verdicts::new();
        let mut probed = 0usize;

        for name in names {
            let Some(domain) = self.sanitizer.sanitize(name) else {
                tracing::debug!(name = %name, "Skipping invalid candidate");
                continue;
            };
            if verdicts.contains(&domain) {
                tracing::debug!(domain = %domain, "Skipping duplicate candidate");
                continue;
            }

            if throttled && probed > 0 {
                self.throttle.pause(self.delay).await;
            }

            let available = self.check_one(&domain).await;
            probed += 1;
            on_verdict(&domain, available);
            verdicts.insert(domain, available);
        }

        tracing::info!(
            names_requested = names.len(),
            domains_checked = verdicts.len(),
            available = verdicts.available_count(),
            batch_duration_ms = %batch_start.elapsed().as_millis(),
            "Batch availability check completed"
        );

        verdicts
    }
}
