//! # linkboard binary
//!
//! Loads settings, picks the storage backend compiled in, and serves the
//! router until Ctrl-C or SIGTERM.

mod telemetry;

use anyhow::Context;
use api_adapters::{create_router, AppState};
use configs::{Settings, StorageBackend, StorageSettings};
use domains::ports::DocumentStore;
use services::ServiceOptions;
use std::sync::Arc;
use storage_adapters::MemoryStore;

#[cfg(feature = "db-sqlite")]
use secrecy::ExposeSecret;
#[cfg(feature = "db-sqlite")]
use storage_adapters::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    telemetry::init(&settings.log)?;

    let store = build_store(&settings.storage).await?;
    let state = AppState::new(
        store,
        ServiceOptions {
            cascade_comments: settings.storage.cascade_comments,
        },
    );
    let app = create_router(state);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    tracing::info!(
        %address,
        backend = ?settings.storage.backend,
        cascade_comments = settings.storage.cascade_comments,
        "linkboard listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("linkboard stopped");
    Ok(())
}

async fn build_store(storage: &StorageSettings) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match storage.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "db-sqlite")]
        StorageBackend::Sqlite => {
            let store = SqliteStore::connect(storage.database_url.expose_secret(), storage.max_connections)
                .await
                .context("opening sqlite database")?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "db-sqlite"))]
        StorageBackend::Sqlite => anyhow::bail!("this build has no sqlite support; rebuild with --features db-sqlite"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
