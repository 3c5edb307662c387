use std::env;

/// Environment variable holding the tracing filter.
pub const LOG_FILTER_ENV_VAR: &str = "RUST_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings read from the environment rather than the command line. The state file
/// path is handled by clap (`--state-file` / `FIT_PLAN_STATE`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
}

impl Config {
    /// Reads configuration from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_filter = lookup(LOG_FILTER_ENV_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self { log_filter }
    }
}
