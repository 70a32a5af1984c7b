//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "MTG_PROBE";

/// Overrides read from the environment
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from MTG_PROBE_BASE_URL
    pub base_url: Option<String>,
    /// Timeout from MTG_PROBE_TIMEOUT
    pub timeout: Option<u64>,
    /// Search timeout from MTG_PROBE_SEARCH_TIMEOUT
    pub search_timeout: Option<u64>,
    /// Strict removal check from MTG_PROBE_STRICT_REMOVAL
    pub strict_removal: Option<bool>,
    /// Output format from MTG_PROBE_FORMAT
    pub format: Option<String>,
    /// Verbose from MTG_PROBE_VERBOSE
    pub verbose: Option<bool>,
}

impl EnvConfig {
    /// Load overrides from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("BASE_URL"),
            timeout: get_env_parse("TIMEOUT"),
            search_timeout: get_env_parse("SEARCH_TIMEOUT"),
            strict_removal: get_env_bool("STRICT_REMOVAL"),
            format: get_env("FORMAT"),
            verbose: get_env_bool("VERBOSE"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.timeout.is_some()
            || self.search_timeout.is_some()
            || self.strict_removal.is_some()
            || self.format.is_some()
            || self.verbose.is_some()
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get and parse environment variable with prefix
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get boolean environment variable with prefix
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_none() {
        let env = EnvConfig::default();
        assert!(!env.has_any());
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("MTG_PROBE_BASE_URL", "https://env.example.com");
        env::set_var("MTG_PROBE_TIMEOUT", "25");
        env::set_var("MTG_PROBE_STRICT_REMOVAL", "true");

        let env_config = EnvConfig::load();
        assert_eq!(
            env_config.base_url.as_deref(),
            Some("https://env.example.com")
        );
        assert_eq!(env_config.timeout, Some(25));
        assert_eq!(env_config.strict_removal, Some(true));
        assert!(env_config.has_any());

        env::remove_var("MTG_PROBE_BASE_URL");
        env::remove_var("MTG_PROBE_TIMEOUT");
        env::remove_var("MTG_PROBE_STRICT_REMOVAL");
    }

    #[test]
    fn test_bool_parsing() {
        env::set_var("MTG_PROBE_VERBOSE", "0");
        assert_eq!(EnvConfig::load().verbose, Some(false));
        env::set_var("MTG_PROBE_VERBOSE", "yes");
        assert_eq!(EnvConfig::load().verbose, Some(true));
        env::remove_var("MTG_PROBE_VERBOSE");
    }
}
