//! `tracing` subscriber setup.

use tally_config::LoggingConfig;
use tally_core::{TallyError, TallyResult};
use tracing_subscriber::{
    fmt, fmt::time::ChronoLocal, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Builds the filter: `RUST_LOG` if set, else the configured level.
pub fn env_filter(config: &LoggingConfig) -> TallyResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TallyError::configuration(format!("Invalid log filter: {e}")))
}

/// Installs the global subscriber.
///
/// Fails if the filter is invalid or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> TallyResult<()> {
    let filter = env_filter(config)?;
    let timer = ChronoLocal::new(config.timestamp_format.clone());
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.is_json() {
        registry
            .with(fmt::layer().json().with_timer(timer).with_target(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_timer(timer)
                    .with_ansi(config.ansi)
                    .with_target(true),
            )
            .try_init()
    };

    result.map_err(|e| TallyError::internal(format!("Failed to install subscriber: {e}")))
}
