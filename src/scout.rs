//! The attempt loop: pick a prompt, generate, probe, persist, decide
//!
//! Each attempt walks `SelectPrompt → Generate → CheckAvailability → Persist
//! → Decide`. The loop stops at the first attempt that finds an available
//! domain, or after `max_retries` attempts.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

use crate::catalog::PromptCatalog;
use crate::config::{LookupBackend, ScoutConfig};
use crate::domain::{AvailabilityProbe, CommandWhois, WhoisLookup};
use crate::error::{Result, ScoutError};
use crate::llm::{create_provider, CandidateSource, NameGenerator, TextGenerator};
use crate::store::ResultStore;
use crate::throttle::{Throttle, TokioThrottle};
use crate::types::{CanonicalDomain, ScoutOutcome, Verdicts};

/// Progress notifications emitted during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoutEvent {
    AttemptStarted { attempt: usize, max_attempts: usize },
    PromptSelected { prompt: String },
    CandidatesGenerated { names: Vec<String>, source: CandidateSource },
    NoCandidates { attempt: usize, will_retry: bool },
    DomainChecked { domain: CanonicalDomain, available: bool },
    ResultsPersisted { written: usize, available: usize },
    PersistFailed { message: String },
    AttemptEmpty { attempt: usize, will_retry: bool },
    Finished { outcome: ScoutOutcome },
}

enum State {
    SelectPrompt,
    Generate { prompt: String },
    CheckAvailability { prompt: String, candidates: Vec<String> },
    Persist { prompt: String, verdicts: Verdicts },
    Decide { verdicts: Verdicts },
    Done(ScoutOutcome),
}

/// Drives generation, probing and persistence for one category
pub struct ScoutOrchestrator {
    catalog: PromptCatalog,
    generator: NameGenerator,
    probe: AvailabilityProbe,
    store: ResultStore,
    rng: Mutex<StdRng>,
    max_retries: usize,
}

impl ScoutOrchestrator {
    pub fn new(
        catalog: PromptCatalog,
        generator: NameGenerator,
        probe: AvailabilityProbe,
        store: ResultStore,
    ) -> Self {
        Self {
            catalog,
            generator,
            probe,
            store,
            rng: Mutex::new(StdRng::from_entropy()),
            max_retries: 3,
        }
    }

    /// Wire up production collaborators from configuration
    pub fn from_config(config: &ScoutConfig) -> Result<Self> {
        let catalog = PromptCatalog::load(&config.prompts_path)?;
        let provider: Arc<dyn TextGenerator> = Arc::from(create_provider(&config.llm)?);
        let throttle: Arc<dyn Throttle> = Arc::new(TokioThrottle);

        let lookup: Arc<dyn WhoisLookup> = match &config.lookup {
            LookupBackend::Command { program } => Arc::new(CommandWhois::with_program(program.clone())),
            #[cfg(feature = "whois")]
            LookupBackend::Tcp => Arc::new(crate::domain::TcpWhois::new()),
            #[cfg(not(feature = "whois"))]
            LookupBackend::Tcp => {
                return Err(ScoutError::config("TCP lookup requires the `whois` feature"));
            }
        };

        let generator = NameGenerator::new(provider, Arc::clone(&throttle)).with_delay(config.generation_delay);
        let probe = AvailabilityProbe::new(lookup, throttle).with_delay(config.probe_delay);
        let store = ResultStore::new(config.results_path.clone());

        Ok(Self::new(catalog, generator, probe, store).with_max_retries(config.max_retries))
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Use a fixed RNG for prompt sampling
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    /// Run without progress reporting
    pub async fn run(&self, category: &str, target_count: usize) -> Result<ScoutOutcome> {
        self.run_with_progress(category, target_count, |_| {}).await
    }

    /// Run the attempt loop for `category`, probing at most `target_count`
    /// names per attempt.
    ///
    /// Fails up front with [`ScoutError::NoPromptsFound`] when the category
    /// has no prompts. Exhaustion is an outcome, not an error.
    pub async fn run_with_progress<F>(
        &self,
        category: &str,
        target_count: usize,
        mut on_event: F,
    ) -> Result<ScoutOutcome>
    where
        F: FnMut(&ScoutEvent),
    {
        let prompts = self.catalog.prompts_for(category);
        if prompts.is_empty() {
            return Err(ScoutError::no_prompts(category));
        }

        tracing::info!(
            category = %category,
            target = target_count,
            max_retries = self.max_retries,
            prompts = prompts.len(),
            "Scouting started"
        );

        let mut attempt = 0usize;
        let mut total_available = 0usize;
        let mut state = State::SelectPrompt;

        loop {
            state = match state {
                State::SelectPrompt => {
                    if attempt >= self.max_retries {
                        State::Done(ScoutOutcome::Exhausted { attempts: attempt })
                    } else {
                        attempt += 1;
                        on_event(&ScoutEvent::AttemptStarted {
                            attempt,
                            max_attempts: self.max_retries,
                        });

                        let prompt = {
                            let mut rng = self.rng.lock();
                            prompts.choose(&mut *rng).cloned()
                        }
                        .ok_or_else(|| ScoutError::internal("prompt list emptied during run"))?;

                        tracing::debug!(attempt, prompt = %prompt, "Prompt selected");
                        on_event(&ScoutEvent::PromptSelected { prompt: prompt.clone() });
                        State::Generate { prompt }
                    }
                }

                State::Generate { prompt } => {
                    let generated = self.generator.generate_detailed(&prompt).await;
                    if generated.names.is_empty() {
                        let will_retry = attempt < self.max_retries;
                        tracing::warn!(attempt, will_retry, "No candidates generated");
                        on_event(&ScoutEvent::NoCandidates { attempt, will_retry });
                        State::SelectPrompt
                    } else {
                        let candidates: Vec<String> = generated.names.into_iter().take(target_count).collect();
                        on_event(&ScoutEvent::CandidatesGenerated {
                            names: candidates.clone(),
                            source: generated.source,
                        });
                        State::CheckAvailability { prompt, candidates }
                    }
                }

                State::CheckAvailability { prompt, candidates } => {
                    let verdicts = self
                        .probe
                        .check_all_with(&candidates, |domain, available| {
                            on_event(&ScoutEvent::DomainChecked {
                                domain: domain.clone(),
                                available,
                            })
                        })
                        .await;
                    State::Persist { prompt, verdicts }
                }

                State::Persist { prompt, verdicts } => {
                    match self.store.append(&verdicts, category, &prompt) {
                        Ok(available) => on_event(&ScoutEvent::ResultsPersisted {
                            written: verdicts.len(),
                            available,
                        }),
                        Err(e) => {
                            tracing::error!(
                                path = %self.store.path().display(),
                                error = %e,
                                "Failed to persist results"
                            );
                            on_event(&ScoutEvent::PersistFailed { message: e.to_string() });
                        }
                    }
                    total_available += verdicts.available_count();
                    State::Decide { verdicts }
                }

                State::Decide { verdicts } => {
                    if total_available > 0 {
                        State::Done(ScoutOutcome::Success {
                            attempts: attempt,
                            available: verdicts.available(),
                        })
                    } else {
                        let will_retry = attempt < self.max_retries;
                        tracing::info!(attempt, will_retry, "No available domains in this batch");
                        on_event(&ScoutEvent::AttemptEmpty { attempt, will_retry });
                        State::SelectPrompt
                    }
                }

                State::Done(outcome) => {
                    tracing::info!(
                        category = %category,
                        attempts = outcome.attempts(),
                        success = outcome.is_success(),
                        available = outcome.available().len(),
                        "Scouting finished"
                    );
                    on_event(&ScoutEvent::Finished { outcome: outcome.clone() });
                    return Ok(outcome);
                }
            };
        }
    }
}
