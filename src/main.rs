//! MTG Collection Tracker backend probe
//!
//! A CLI tool that black-box tests a tracker deployment's REST API: the
//! session lifecycle, card search, card detail with price history, and the
//! per-user collection CRUD surface. It drives a fixed 13-step scenario,
//! prints one pass/fail line per step plus a summary, and exits non-zero
//! when any recorded step did not pass.
//!
//! ## Usage
//!
//! ```bash
//! # Run the scenario against a deployment
//! mtg-tracker-probe run --base-url https://tracker.example.com
//!
//! # Assert that removal actually empties the collection
//! mtg-tracker-probe run --base-url http://localhost:8080 --strict-removal
//!
//! # List the scenario steps
//! mtg-tracker-probe list --detailed
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod scenario;
mod utils;

use cli::Args;
use config::{EnvConfig, ProbeConfig};
use executor::ScenarioRunner;
use models::TestCase;
use output::{OutputFormat, ResultFormatter};
use utils::logger::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    init_logger(verbose_enabled(args.verbose, &env));

    match args.command {
        cli::Command::Run(run_args) => {
            let summary = run_probe(run_args, env).await?;
            if !summary.is_all_passed() {
                std::process::exit(1);
            }
        }
        cli::Command::List(list_args) => {
            list_steps(list_args);
        }
    }

    Ok(())
}

/// Debug logging is on when either the `--verbose` flag or
/// `MTG_PROBE_VERBOSE` asks for it
fn verbose_enabled(flag: bool, env: &EnvConfig) -> bool {
    flag || env.verbose.unwrap_or(false)
}

async fn run_probe(args: cli::RunArgs, env: EnvConfig) -> Result<models::TestRunSummary> {
    if env.has_any() {
        tracing::debug!("environment overrides active");
    }

    let mut config = ProbeConfig::default().apply_env(&env);
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(timeout) = args.search_timeout {
        config.search_timeout_secs = timeout;
    }
    if let Some(delay) = args.delay {
        config.removal_delay_secs = delay;
    }
    if args.strict_removal {
        config.strict_removal = true;
    }

    let format_name = args
        .format
        .or(env.format)
        .unwrap_or_else(|| "table".to_string());
    let format = OutputFormat::from_str(&format_name)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {format_name}"))?;

    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    println!("Starting tracker backend API probe");
    println!("Testing against: {}/api", config.base_url.trim_end_matches('/'));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let runner = ScenarioRunner::new(config, formatter)?;
    let summary = runner.run().await?;

    println!("{}", formatter.format_summary(&summary));

    Ok(summary)
}

fn list_steps(args: cli::ListArgs) {
    println!("\nScenario steps (13 total)\n");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut current_category = "";

    for case in TestCase::all() {
        let category = case.category();
        if args.detailed && category != current_category {
            if !current_category.is_empty() {
                println!();
            }
            println!("{category} steps:");
            println!("──────────────────────────────────────────────────");
            current_category = category;
        }

        println!("  {:2}. {}", case.number(), case.name());
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_env_enables_debug_logging() {
        let mut env = EnvConfig::default();
        assert!(!verbose_enabled(false, &env));
        assert!(verbose_enabled(true, &env));

        env.verbose = Some(true);
        assert!(verbose_enabled(false, &env));

        env.verbose = Some(false);
        assert!(!verbose_enabled(false, &env));
        assert!(verbose_enabled(true, &env));
    }
}
