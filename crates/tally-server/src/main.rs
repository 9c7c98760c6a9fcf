//! # Tally Server
//!
//! Demo HTTP server that logs every request through the Tally access log
//! middleware.

use std::net::SocketAddr;
use tally_config::{ConfigLoader, LoggingConfig};
use tally_core::{TallyError, TallyResult};
use tally_server::{build_router, init_logging, print_banner, print_startup_info, shutdown_signal};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            let _ = init_logging(&LoggingConfig::default());
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(loader).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(loader: ConfigLoader) -> TallyResult<()> {
    let config = loader.get().await;
    init_logging(&config.logging)?;

    print_banner();
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    print_startup_info(&config);

    let router = build_router(&config);
    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TallyError::server(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| TallyError::server(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}
