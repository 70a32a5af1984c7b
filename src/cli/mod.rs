//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};

/// Black-box API test probe for the MTG collection tracker backend
#[derive(Parser, Debug)]
#[command(name = "mtg-tracker-probe")]
#[command(version = "0.1.0")]
#[command(about = "Run the fixed API scenario against a tracker deployment")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full probe scenario
    Run(RunArgs),

    /// List the scenario steps
    List(ListArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Backend base URL, without the /api prefix
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Timeout for search and detail calls in seconds
    #[arg(long)]
    pub search_timeout: Option<u64>,

    /// Delay before the removal confirmation check, in seconds
    #[arg(long)]
    pub delay: Option<u64>,

    /// Fail the removal confirmation if the card is still present
    #[arg(long)]
    pub strict_removal: bool,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Disable colorized output
    #[arg(long)]
    pub no_color: bool,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show step categories
    #[arg(short, long)]
    pub detailed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["mtg-tracker-probe", "list", "--detailed"]);
        match args.command {
            Command::List(list_args) => {
                assert!(list_args.detailed);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_run_args() {
        let args = Args::parse_from([
            "mtg-tracker-probe",
            "run",
            "--base-url",
            "https://tracker.example.com",
            "--timeout",
            "5",
            "--strict-removal",
        ]);
        match args.command {
            Command::Run(run_args) => {
                assert_eq!(
                    run_args.base_url.as_deref(),
                    Some("https://tracker.example.com")
                );
                assert_eq!(run_args.timeout, Some(5));
                assert!(run_args.strict_removal);
                assert!(run_args.format.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }
}
