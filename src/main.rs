//! Domain Scout - generate brandable domain names and find available ones
//!
//! Usage: `domain-scout [category] [count]`

use domain_scout::{
    llm::CandidateSource, ScoutConfig, ScoutError, ScoutEvent, ScoutOrchestrator, ScoutOutcome,
};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

const DEFAULT_CATEGORY: &str = "sports";
const DEFAULT_COUNT: usize = 10;
const MAX_COUNT: usize = 50;

#[tokio::main]
async fn main() {
    // Initialize the library
    if let Err(e) = domain_scout::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    // Check for help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        process::exit(0);
    }

    let (category, count) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    };

    let config = match ScoutConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            eprintln!("   Create a .env file with:");
            eprintln!("   OPENAI_API_KEY=your_openai_api_key_here");
            process::exit(1);
        }
    };

    match run_scout(&config, &category, count).await {
        Ok(outcome) if outcome.is_success() => process::exit(0),
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!();
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    }
}

/// Positional `[category] [count]` with defaults
fn parse_args(args: &[String]) -> Result<(String, usize), ScoutError> {
    let category = args.first().cloned().unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let count = match args.get(1) {
        Some(raw) => raw.trim().parse::<usize>().unwrap_or(0),
        None => DEFAULT_COUNT,
    };

    if !(1..=MAX_COUNT).contains(&count) {
        return Err(ScoutError::validation(format!(
            "Number of domains must be between 1 and {}",
            MAX_COUNT
        )));
    }

    Ok((category, count))
}

/// Main domain scout workflow
async fn run_scout(config: &ScoutConfig, category: &str, count: usize) -> domain_scout::Result<ScoutOutcome> {
    println!("🚀 Domain Scout starting...");
    println!("   Category: {}", category);
    println!("   Target: {} domains", count);
    println!("   Max retries: {}", config.max_retries);

    let scout = ScoutOrchestrator::from_config(config)?;
    let outcome = scout.run_with_progress(category, count, print_event).await?;

    match scout.store().summarize() {
        Ok(summary) => println!("\n📊 {}", summary),
        Err(e) => tracing::warn!(error = %e, "Could not summarize results"),
    }

    Ok(outcome)
}

fn print_event(event: &ScoutEvent) {
    match event {
        ScoutEvent::AttemptStarted { attempt, max_attempts } => {
            println!("\n🔄 Attempt {}/{}", attempt, max_attempts);
        }
        ScoutEvent::PromptSelected { prompt } => {
            let preview: String = prompt.chars().take(80).collect();
            let ellipsis = if prompt.chars().count() > 80 { "..." } else { "" };
            println!("📝 Using prompt: \"{}{}\"", preview, ellipsis);
            println!("🤖 Generating domains...");
        }
        ScoutEvent::NoCandidates { will_retry, .. } => {
            if *will_retry {
                println!("❌ No domains generated, retrying...");
            } else {
                println!("❌ No domains generated");
            }
        }
        ScoutEvent::CandidatesGenerated { names, source } => {
            if *source == CandidateSource::Fallback {
                println!("   ⚠️  Model unavailable, using rule-based names");
            }
            println!("🎯 Generated {} domain ideas", names.len());
            println!("\n🔍 Checking domain availability...");
        }
        ScoutEvent::DomainChecked { domain, available } => {
            println!("{}: {}", domain, if *available { "AVAILABLE" } else { "taken" });
        }
        ScoutEvent::ResultsPersisted { written, available } => {
            println!("\n✅ Wrote {} domains", written);
            println!("   └─ {} available, {} taken", available, written - available);
        }
        ScoutEvent::PersistFailed { message } => {
            println!("\n⚠️  Could not write results: {}", message);
        }
        ScoutEvent::AttemptEmpty { will_retry, .. } => {
            println!("\n😞 No available domains in this batch");
            if *will_retry {
                println!("   Retrying with a different prompt...");
            }
        }
        ScoutEvent::Finished { outcome } => match outcome {
            ScoutOutcome::Success { available, .. } => {
                println!("\n🎉 Success! Found {} available domains", available.len());
                println!("\n💎 Available domains:");
                for (index, domain) in available.iter().enumerate() {
                    println!("   {}. {}", index + 1, domain);
                }
            }
            ScoutOutcome::Exhausted { attempts } => {
                println!("\n❌ Failed to find any available domains after {} attempts", attempts);
                println!("   All generated domains were already taken");
            }
        },
    }
}

/// Print help information
fn print_help() {
    println!("🔭 Domain Scout - Generate and check domain availability");
    println!("═══════════════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    domain-scout [CATEGORY] [NUMBER_OF_DOMAINS]");
    println!();
    println!("EXAMPLES:");
    println!("    domain-scout sports 5");
    println!("    domain-scout ai_automation 10");
    println!("    domain-scout finance_fintech 15");
    println!();
    println!("CATEGORIES:");
    println!("    sports, ai_automation, saas_niches, finance_fintech,");
    println!("    sports_fitness_training, sports_psychology, sports_tech");
    println!("    (and any other key in prompts.yml)");
    println!();
    println!("Default: {} category, {} domains (max {})", DEFAULT_CATEGORY, DEFAULT_COUNT, MAX_COUNT);
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    OPENAI_API_KEY     OpenAI API key (or ANTHROPIC_API_KEY)");
    println!("    OPENAI_MODEL       OpenAI model (default: gpt-4.1-nano)");
    println!("    OPENAI_BASE_URL    OpenAI-compatible endpoint");
    println!("    SCOUT_PROMPTS      Prompt catalog (default: prompts.yml)");
    println!("    SCOUT_RESULTS      Results CSV (default: results.csv)");
    println!("    SCOUT_WHOIS        Lookup backend: command | tcp (default: command)");
    println!("    RUST_LOG           Log filter (default: warn)");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        assert_eq!(parse_args(&[]).unwrap(), ("sports".to_string(), 10));
        assert_eq!(parse_args(&args(&["ai_automation"])).unwrap(), ("ai_automation".to_string(), 10));
    }

    #[test]
    fn test_parse_args_count_bounds() {
        assert_eq!(parse_args(&args(&["sports", "1"])).unwrap().1, 1);
        assert_eq!(parse_args(&args(&["sports", "50"])).unwrap().1, 50);
        assert!(parse_args(&args(&["sports", "0"])).is_err());
        assert!(parse_args(&args(&["sports", "51"])).is_err());
        assert!(parse_args(&args(&["sports", "many"])).is_err());
    }
}
