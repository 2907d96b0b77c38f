mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;
mod summarizer;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use handlers::rest;
use repository::Repository;
use service::{NoteService, SummaryBounds};
use summarizer::HuggingFaceSummarizer;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Successfully loaded notes service config");

    // Repository creation and migration
    let mut repo = Repository::new(&cfg.database_dsn)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to establish database connection: {e}");
            panic!("failed to establish database connection: {e}");
        });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Summarizer is built once and shared by every request
    let summarizer = HuggingFaceSummarizer::new(&cfg.summarizer).unwrap_or_else(|e| {
        tracing::error!("Failed to initialize summarizer: {e}");
        panic!("failed to initialize summarizer: {e}");
    });

    // Service creation
    let bounds = SummaryBounds {
        max_length: cfg.summarizer.max_length,
        min_length: cfg.summarizer.min_length,
    };
    let service = Arc::new(NoteService::new(
        Arc::new(repo),
        Arc::new(summarizer),
        bounds,
    ));

    let router = rest::router(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to port {}: {e}", cfg.port);
            panic!("failed to bind to port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("REST server starting, listening on {}", addr),
        Err(e) => tracing::warn!("REST server starting, local address unavailable: {e}"),
    }

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }

    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
