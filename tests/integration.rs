//! Integration tests for domain-scout

use async_trait::async_trait;
use domain_scout::{
    domain::{AvailabilityProbe, WhoisLookup},
    llm::{NameGenerator, TextGenerator},
    throttle::{NoThrottle, RecordingThrottle},
    CanonicalDomain, GenerationError, PromptCatalog, ResultStore, ScoutError, ScoutEvent,
    ScoutOrchestrator, ScoutOutcome, StoreSummary,
};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

type Reply = Result<String, GenerationError>;

/// Hands out canned replies in order, then empty strings
#[derive(Clone, Default)]
struct ScriptedModel {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedModel {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            calls: Arc::default(),
        }
    }

    fn calls(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedModel {
    async fn complete(&self, _system: &str, user: &str) -> Reply {
        self.calls.lock().push(user.to_string());
        self.replies.lock().pop_front().unwrap_or_else(|| Ok(String::new()))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }
}

/// Registry stand-in: listed domains are free, everything else is taken
#[derive(Clone, Default)]
struct FakeRegistry {
    free: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<Vec<String>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl FakeRegistry {
    fn with_free(domains: &[&str]) -> Self {
        let registry = Self::default();
        registry.free.lock().extend(domains.iter().map(|d| d.to_string()));
        registry
    }

    fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }
}

#[async_trait]
impl WhoisLookup for FakeRegistry {
    async fn lookup(&self, domain: &CanonicalDomain) -> domain_scout::Result<String> {
        let name = domain.to_string();
        self.lookups.lock().push(name.clone());
        if self.failing.lock().contains(&name) {
            return Err(ScoutError::lookup(name, "connection reset", None));
        }
        if self.free.lock().contains(&name) {
            Ok(format!("No match for \"{}\".", name.to_uppercase()))
        } else {
            Ok(format!("Domain Name: {}\nRegistrar: Example Registrar, Inc.", name.to_uppercase()))
        }
    }

    fn method_name(&self) -> &'static str {
        "fake"
    }
}

struct Harness {
    _dir: TempDir,
    model: ScriptedModel,
    registry: FakeRegistry,
    scout: ScoutOrchestrator,
}

fn harness(catalog: PromptCatalog, model: ScriptedModel, registry: FakeRegistry) -> Harness {
    let dir = TempDir::new().unwrap();
    let store = ResultStore::new(dir.path().join("results.csv"));
    harness_with_store(dir, store, catalog, model, registry)
}

fn harness_with_store(
    dir: TempDir,
    store: ResultStore,
    catalog: PromptCatalog,
    model: ScriptedModel,
    registry: FakeRegistry,
) -> Harness {
    let generator = NameGenerator::with_rng(
        Arc::new(model.clone()),
        Arc::new(NoThrottle),
        StdRng::seed_from_u64(11),
    );
    let probe = AvailabilityProbe::new(Arc::new(registry.clone()), Arc::new(NoThrottle));
    let scout = ScoutOrchestrator::new(catalog, generator, probe, store)
        .with_max_retries(3)
        .with_rng(StdRng::seed_from_u64(5));

    Harness {
        _dir: dir,
        model,
        registry,
        scout,
    }
}

fn sports_catalog() -> PromptCatalog {
    PromptCatalog::new().with_category("sports", ["Names for a pickup basketball app"])
}

fn names(domains: &[CanonicalDomain]) -> Vec<&str> {
    domains.iter().map(CanonicalDomain::as_str).collect()
}

#[tokio::test]
async fn test_end_to_end_single_prompt() {
    let h = harness(
        sports_catalog(),
        ScriptedModel::new(vec![Ok("1. alpha\n2. beta".to_string())]),
        FakeRegistry::with_free(&["beta.com"]),
    );

    let outcome = h.scout.run("sports", 10).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.attempts(), 1);
    assert_eq!(names(outcome.available()), vec!["beta.com"]);
    assert_eq!(h.registry.lookups(), vec!["alpha.com", "beta.com"]);

    let records = h.scout.store().records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].domain, "alpha.com");
    assert_eq!(records[0].prompt_category, "sports");
    assert_eq!(records[0].prompt_text, "Names for a pickup basketball app");
    assert_eq!(
        h.scout.store().summarize().unwrap(),
        StoreSummary::Counts { total: 2, available: 1 }
    );
}

#[tokio::test]
async fn test_exhausts_after_max_retries() {
    let h = harness(
        sports_catalog(),
        ScriptedModel::new(vec![
            Ok("1. alpha\n2. beta".to_string()),
            Ok("1. gamma".to_string()),
            Ok("1. delta\n2. epsilon".to_string()),
            Ok("1. never-asked".to_string()),
        ]),
        FakeRegistry::default(),
    );

    let outcome = h.scout.run("sports", 10).await.unwrap();

    assert_eq!(outcome, ScoutOutcome::Exhausted { attempts: 3 });
    assert_eq!(h.model.calls(), 3);
    assert_eq!(h.registry.lookups().len(), 5);
    assert_eq!(
        h.scout.store().summarize().unwrap(),
        StoreSummary::Counts { total: 5, available: 0 }
    );
}

#[tokio::test]
async fn test_stops_at_first_successful_attempt() {
    let h = harness(
        sports_catalog(),
        ScriptedModel::new(vec![
            Ok("1. alpha\n2. beta".to_string()),
            Ok("1. gamma\n2. delta\n3. omega".to_string()),
            Ok("1. zeta".to_string()),
        ]),
        // zeta would also be free, but attempt 3 must never run
        FakeRegistry::with_free(&["delta.com", "omega.com", "zeta.com"]),
    );

    let mut events = Vec::new();
    let outcome = h
        .scout
        .run_with_progress("sports", 10, |e| events.push(e.clone()))
        .await
        .unwrap();

    assert_eq!(outcome.attempts(), 2);
    assert_eq!(names(outcome.available()), vec!["delta.com", "omega.com"]);
    assert_eq!(h.model.calls(), 2);
    assert!(!h.registry.lookups().contains(&"zeta.com".to_string()));

    let started = events
        .iter()
        .filter(|e| matches!(e, ScoutEvent::AttemptStarted { .. }))
        .count();
    assert_eq!(started, 2);
    assert!(matches!(
        events.last(),
        Some(ScoutEvent::Finished { outcome }) if outcome.is_success()
    ));
}

#[tokio::test]
async fn test_missing_category_runs_no_attempts() {
    let model = ScriptedModel::new(vec![Ok("1. alpha".to_string())]);
    let h = harness(sports_catalog(), model, FakeRegistry::default());

    let err = h.scout.run("curling", 10).await.unwrap_err();

    assert!(matches!(err, ScoutError::NoPromptsFound { ref category } if category == "curling"));
    assert_eq!(h.model.calls(), 0);
    assert_eq!(h.scout.store().summarize().unwrap(), StoreSummary::NoData);
}

#[tokio::test]
async fn test_generation_failure_uses_fallback_names() {
    let catalog = PromptCatalog::new()
        .with_category("sports", ["Brandable names for a marathon training tracker"]);
    let h = harness(
        catalog,
        ScriptedModel::new(vec![Err(GenerationError::from_status(429, "Too Many Requests"))]),
        FakeRegistry::default(),
    );

    let mut generated = Vec::new();
    let outcome = h
        .scout
        .run_with_progress("sports", 4, |e| {
            if let ScoutEvent::CandidatesGenerated { names, source } = e {
                generated.push((names.clone(), *source));
            }
        })
        .await
        .unwrap();

    // every attempt falls back: the first errors, the rest get empty replies
    assert_eq!(outcome, ScoutOutcome::Exhausted { attempts: 3 });
    assert_eq!(generated.len(), 3);
    for (names, source) in &generated {
        assert_eq!(*source, domain_scout::llm::CandidateSource::Fallback);
        assert_eq!(names.len(), 4);
        assert!(names.iter().all(|n| (6..=18).contains(&n.len())));
    }
}

#[tokio::test]
async fn test_empty_generation_consumes_attempts() {
    // no usable keywords, so the fallback has nothing to work with either
    let catalog = PromptCatalog::new().with_category("sports", ["the and for"]);
    let h = harness(
        catalog,
        ScriptedModel::new(vec![Err(GenerationError::unexpected("socket closed"))]),
        FakeRegistry::default(),
    );

    let mut retry_flags = Vec::new();
    let outcome = h
        .scout
        .run_with_progress("sports", 10, |e| {
            if let ScoutEvent::NoCandidates { will_retry, .. } = e {
                retry_flags.push(*will_retry);
            }
        })
        .await
        .unwrap();

    assert_eq!(outcome, ScoutOutcome::Exhausted { attempts: 3 });
    assert_eq!(retry_flags, vec![true, true, false]);
    assert!(h.registry.lookups().is_empty());
    assert_eq!(h.scout.store().summarize().unwrap(), StoreSummary::NoData);
}

#[tokio::test]
async fn test_target_count_limits_probing() {
    let h = harness(
        sports_catalog(),
        ScriptedModel::new(vec![Ok("1. one-name\n2. two-name\n3. three-name\n4. four-name".to_string())]),
        FakeRegistry::with_free(&["two-name.com", "four-name.com"]),
    );

    let outcome = h.scout.run("sports", 2).await.unwrap();

    assert_eq!(h.registry.lookups(), vec!["one-name.com", "two-name.com"]);
    assert_eq!(names(outcome.available()), vec!["two-name.com"]);
}

#[tokio::test]
async fn test_probe_failure_counts_as_taken() {
    let registry = FakeRegistry::with_free(&["beta.com", "gamma.com"]);
    registry.failing.lock().push("beta.com".to_string());

    let h = harness(
        sports_catalog(),
        ScriptedModel::new(vec![Ok("1. alpha\n2. beta\n3. gamma".to_string())]),
        registry,
    );

    let outcome = h.scout.run("sports", 10).await.unwrap();

    assert_eq!(names(outcome.available()), vec!["gamma.com"]);
    let records = h.scout.store().records().unwrap();
    assert_eq!(records.len(), 3);
    assert!(!records[1].status.is_available());
}

#[tokio::test]
async fn test_store_failure_does_not_abort() {
    let dir = TempDir::new().unwrap();
    // a directory where the CSV file should be makes every append fail
    let blocked = dir.path().join("results.csv");
    std::fs::create_dir(&blocked).unwrap();

    let h = harness_with_store(
        dir,
        ResultStore::new(blocked),
        sports_catalog(),
        ScriptedModel::new(vec![Ok("1. alpha\n2. beta".to_string())]),
        FakeRegistry::with_free(&["beta.com"]),
    );

    let mut persist_failures = 0;
    let outcome = h
        .scout
        .run_with_progress("sports", 10, |e| {
            if matches!(e, ScoutEvent::PersistFailed { .. }) {
                persist_failures += 1;
            }
        })
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(persist_failures, 1);
}

#[tokio::test]
async fn test_throttles_generation_and_probes() {
    let dir = TempDir::new().unwrap();
    let throttle = RecordingThrottle::new();
    let model = ScriptedModel::new(vec![Ok("1. alpha\n2. beta\n3. gamma".to_string())]);
    let registry = FakeRegistry::with_free(&["gamma.com"]);

    let generator = NameGenerator::with_rng(
        Arc::new(model),
        Arc::new(throttle.clone()),
        StdRng::seed_from_u64(1),
    );
    let probe = AvailabilityProbe::new(Arc::new(registry), Arc::new(throttle.clone()));
    let scout = ScoutOrchestrator::new(
        sports_catalog(),
        generator,
        probe,
        ResultStore::new(dir.path().join("results.csv")),
    );

    assert!(scout.run("sports", 10).await.unwrap().is_success());
    assert_eq!(
        throttle.pauses(),
        vec![
            Duration::from_millis(500),
            Duration::from_secs(1),
            Duration::from_secs(1),
        ]
    );
}

#[test]
fn test_library_initialization() {
    assert!(domain_scout::init().is_ok());
}

#[test]
fn test_sanitizer_examples() {
    let sanitizer = domain_scout::NameSanitizer::new();
    assert_eq!(sanitizer.sanitize("HTTP://WWW.Foo.Com/x").unwrap(), "foo.com");
    assert_eq!(sanitizer.sanitize("bar").unwrap(), "bar.com");
    assert!(sanitizer.sanitize("").is_none());
    assert!(sanitizer.sanitize("not a domain!!").is_none());
}

#[test]
fn test_orchestrator_is_send_sync() {
    fn check<T: Send + Sync>() {}
    check::<ScoutOrchestrator>();
}
