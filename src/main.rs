use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use vocab_review::api::{AppState, create_server};
use vocab_review::config::ServerConfig;
use vocab_review::export::{export_service_to_path, import_into_service};
use vocab_review::*;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
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
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn open_store(config: &ServerConfig) -> Result<Box<dyn ReviewStore>, StoreError> {
    match &config.db_path {
        Some(path) => {
            info!(path = %path.display(), "Using SQLite review store");
            Ok(Box::new(SqliteStore::open(path)?))
        }
        None => {
            info!("Using in-memory review store, state is lost on exit");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    let mut service = ReviewService::new(open_store(&config)?, Arc::new(SystemClock));
    if let Some(days) = config.daily_retention_days {
        service = service.with_daily_retention(days);
    }

    if let Some(path) = &config.import_path {
        import_into_service(&service, path)?;
    }

    let state = AppState::new(service);
    let app = create_server(state.clone());

    let addr = config.socket_addr()?;
    info!("Spaced repetition API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    if let Some(path) = &config.export_path {
        let written = export_service_to_path(&state.service, path)?;
        info!(count = written, path = %path.display(), "Wrote review state snapshot");
    }

    info!("Server stopped cleanly");
    Ok(())
}
