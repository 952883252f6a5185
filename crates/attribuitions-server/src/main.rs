use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::{net::TcpListener, signal};

use attribuitions_commands::{config::DATABASE_PATH_ENV, logging, Config, Registry};
use attribuitions_core::Storage;
use attribuitions_server::{attribuitions_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // get injected database path: ex: DATABASE_PATH=./database.db attribuitions-server
    let config = match std::env::var_os(DATABASE_PATH_ENV).filter(|path| !path.is_empty()) {
        Some(path) => Config::load_with_db_path(path.into())?,
        None => Config::load()?,
    };
    logging::init(&config.log_level)?;

    if let Some(parent) = config.database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let storage = Storage::open(&config.database_path)
        .with_context(|| format!("Could not open {}", config.database_path.display()))?;
    let storage = Arc::new(storage);

    let state = AppState::new(Arc::clone(&storage), Arc::new(Registry::new()));
    let app = attribuitions_router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    log::info!(
        "Serving {} on {}",
        config.database_path.display(),
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout()))
        .await?;

    if let Err(err) = storage.close() {
        log::error!("{}", err);
        std::process::exit(1);
    }

    log::info!("Server exiting");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM and arms a watchdog: if connections have
/// not drained within `grace`, the process aborts.
async fn shutdown_signal(grace: Duration) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                log::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => log::info!("Received Ctrl+C, shutting down..."),
        () = terminate => log::info!("Received SIGTERM, shutting down..."),
    }

    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        log::error!("Server forced to shutdown after {:?}", grace);
        std::process::exit(1);
    });
}
