//! Tracing setup
//!
//! Diagnostics go to stderr so that stdout stays the machine-consumable
//! artifact: the per-step pass/fail lines and the summary. A `RUST_LOG`
//! value in the environment overrides the default filter entirely.

use tracing_subscriber::EnvFilter;

fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("mtg_tracker_probe={level}")
}

/// Install the global subscriber, writing to stderr
pub fn init_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
