//! Error types shared by the Tally crates.

use thiserror::Error;

/// Unified error type for Tally.
///
/// The access logger itself never fails a request: pipeline errors are passed
/// through untouched and body errors travel on the body. These variants cover
/// what can go wrong around it, such as loading configuration or starting
/// the server.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error (binding sockets, reading files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TallyError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Server(_) => "SERVER_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a server error.
    #[must_use]
    pub fn server<T: Into<String>>(message: T) -> Self {
        Self::Server(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}
