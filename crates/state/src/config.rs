//! Event stream configuration.

use anyhow::{Context, bail};

/// Enables/disables event publication (`true`/`false`/`1`/`0`).
pub const ENABLED_VAR: &str = "STATESTREAM_EVENTS_ENABLED";

/// Standard tracing filter directive.
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsConfig {
    /// When false, commits are not translated or published.
    pub enabled: bool,
    pub log_filter: String,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_filter: "info".to_string(),
        }
    }
}

impl EventsConfig {
    /// Load from the process environment; unset variables keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENABLED_VAR) {
            config.enabled = parse_bool(&raw).with_context(|| format!("invalid {ENABLED_VAR}"))?;
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => bail!("expected true/false/1/0, got {other:?}"),
    }
}
