//! Access logger configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable consulted by [`RuntimeMode::Detect`].
pub const ENVIRONMENT_VAR: &str = "TALLY_ENVIRONMENT";

/// Controls how much detail failure lines carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// Failure lines carry only the error's display message.
    Production,
    /// Failure lines carry the error's full debug representation.
    Development,
    /// Reads `TALLY_ENVIRONMENT` on every failure; `production` selects
    /// production behavior.
    #[default]
    Detect,
}

impl RuntimeMode {
    /// Returns true if failure detail should be reduced to a summary.
    #[must_use]
    pub fn is_production(&self) -> bool {
        match self {
            Self::Production => true,
            Self::Development => false,
            Self::Detect => std::env::var(ENVIRONMENT_VAR)
                .map(|env| env.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Development => write!(f, "development"),
            Self::Detect => write!(f, "detect"),
        }
    }
}

/// Access logger settings, passed to the middleware at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogConfig {
    /// Category label attached to every record.
    #[serde(default = "default_category")]
    pub category: String,

    /// Failure detail mode.
    #[serde(default)]
    pub mode: RuntimeMode,

    /// Color method and status tokens.
    #[serde(default)]
    pub colors: bool,

    /// Path prefixes that are passed through without a record.
    #[serde(default)]
    pub exclude_paths: Vec<String>,
}

fn default_category() -> String {
    "http".to_string()
}

impl Default for AccessLogConfig {
    fn default() -> Self {
        Self {
            category: default_category(),
            mode: RuntimeMode::default(),
            colors: false,
            exclude_paths: Vec::new(),
        }
    }
}

impl AccessLogConfig {
    /// Returns true if requests to `path` should not be logged.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_paths.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}
