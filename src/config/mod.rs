//! Probe configuration
//!
//! Precedence: built-in defaults, then `MTG_PROBE_*` environment variables,
//! then command-line flags.

#![allow(dead_code)]

mod env;

pub use env::EnvConfig;

/// Default per-call timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Timeout for card search and detail calls, which hit the upstream
/// card-data provider and are slower
pub const SEARCH_TIMEOUT_SECS: u64 = 15;

/// Delay before confirming a removal, to allow for server-side
/// eventual consistency
pub const REMOVAL_DELAY_SECS: u64 = 1;

/// Configuration for a scenario run
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    /// Backend base URL, without the `/api` prefix
    pub base_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Timeout for search and detail calls in seconds
    pub search_timeout_secs: u64,
    /// Delay before the removal confirmation check in seconds
    pub removal_delay_secs: u64,
    /// Fail the removal confirmation if the card is still present,
    /// instead of only logging the observed value
    pub strict_removal: bool,
}

impl ProbeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            search_timeout_secs: SEARCH_TIMEOUT_SECS,
            removal_delay_secs: REMOVAL_DELAY_SECS,
            strict_removal: false,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_search_timeout(mut self, secs: u64) -> Self {
        self.search_timeout_secs = secs;
        self
    }

    pub fn with_removal_delay(mut self, secs: u64) -> Self {
        self.removal_delay_secs = secs;
        self
    }

    pub fn with_strict_removal(mut self, strict: bool) -> Self {
        self.strict_removal = strict;
        self
    }

    /// Apply environment overrides on top of the current values
    pub fn apply_env(mut self, env: &EnvConfig) -> Self {
        if let Some(base_url) = &env.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(timeout) = env.search_timeout {
            self.search_timeout_secs = timeout;
        }
        if let Some(strict) = env.strict_removal {
            self.strict_removal = strict;
        }
        self
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.search_timeout_secs, 15);
        assert_eq!(config.removal_delay_secs, 1);
        assert!(!config.strict_removal);
    }

    #[test]
    fn test_builder() {
        let config = ProbeConfig::new("https://tracker.example.com")
            .with_timeout(5)
            .with_strict_removal(true);

        assert_eq!(config.base_url, "https://tracker.example.com");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.strict_removal);
    }

    #[test]
    fn test_apply_env_overrides() {
        let env = EnvConfig {
            base_url: Some("https://override.example.com".to_string()),
            timeout: Some(20),
            ..Default::default()
        };

        let config = ProbeConfig::default().apply_env(&env);
        assert_eq!(config.base_url, "https://override.example.com");
        assert_eq!(config.timeout_secs, 20);
        assert_eq!(config.search_timeout_secs, 15);
    }
}
