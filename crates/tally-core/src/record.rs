//! Severity levels and the access log record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an access log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Normal traffic.
    #[default]
    Info,
    /// Client errors and destructive methods.
    Warning,
    /// Server errors and pipeline failures.
    Error,
}

impl Level {
    /// Returns the level name as written in log output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Maps the level onto the closest `tracing` level.
    #[must_use]
    pub const fn as_tracing(&self) -> tracing::Level {
        match self {
            Self::Info => tracing::Level::INFO,
            Self::Warning => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One emitted access log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Severity.
    pub level: Level,
    /// Constant label identifying the emitter.
    pub category: String,
    /// Formatted line.
    pub message: String,
}

impl LogRecord {
    /// Creates a new record.
    pub fn new(level: Level, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            category: category.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.category, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
    }

    #[test]
    fn test_level_tracing_mapping() {
        assert_eq!(Level::Info.as_tracing(), tracing::Level::INFO);
        assert_eq!(Level::Warning.as_tracing(), tracing::Level::WARN);
        assert_eq!(Level::Error.as_tracing(), tracing::Level::ERROR);
    }

    #[test]
    fn test_level_serde() {
        assert_eq!(serde_json::to_string(&Level::Warning).unwrap(), "\"warning\"");
        let level: Level = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(level, Level::Error);
    }

    #[test]
    fn test_record_display() {
        let record = LogRecord::new(Level::Warning, "http", "1.2.3.4 404 GET /missing 3ms 9B");
        assert_eq!(record.to_string(), "[warning] http: 1.2.3.4 404 GET /missing 3ms 9B");
    }
}
