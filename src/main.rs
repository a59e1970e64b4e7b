// Main entry point for the member sync service

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use member_sync::adapters::http::{webhook_router, WebhookAppState};
use member_sync::adapters::{
    DryRunDirectory, HttpMemberSource, InMemoryMembershipStore, PostgresMemberStore,
    UnifiDirectory,
};
use member_sync::application::{ReconciliationEngine, ReconciliationScheduler, WebhookProcessor};
use member_sync::config::{AppConfig, DatabaseConfig};
use member_sync::domain::billing::WebhookVerifier;
use member_sync::ports::MembershipStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize logging; RUST_LOG wins over the configured filter
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate().context("Invalid configuration")?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting member sync");

    let store = connect_store(&config.database).await?;
    let directory = Arc::new(
        UnifiDirectory::new(&config.directory).context("Failed to create directory client")?,
    );

    let processor = Arc::new(WebhookProcessor::new(
        WebhookVerifier::new(config.webhook.signing_secret.clone()),
        store,
        directory.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler_task = if config.sync.enabled {
        let remote = Arc::new(
            HttpMemberSource::new(&config.remote).context("Failed to create member source")?,
        );
        let engine = if config.sync.dry_run {
            tracing::warn!("Dry run enabled, reconciliation will not change the directory");
            let dry_run = Arc::new(DryRunDirectory::new(directory.clone()));
            ReconciliationEngine::new(remote, dry_run.clone(), dry_run)
        } else {
            ReconciliationEngine::new(remote, directory.clone(), directory.clone())
        };
        let engine = Arc::new(engine);
        let scheduler = Arc::new(ReconciliationScheduler::new(engine, config.sync.interval()));

        Some(tokio::spawn(async move { scheduler.run(shutdown_rx).await }))
    } else {
        tracing::info!("Periodic reconciliation disabled");
        None
    };

    let state = WebhookAppState::new(processor, config.webhook.signature_header.clone());
    let app = webhook_router(&config.webhook.path, state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!(%addr, path = %config.webhook.path, "Listening for webhooks");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    let _ = shutdown_tx.send(true);
    if let Some(task) = scheduler_task {
        task.await.context("Reconciliation task panicked")?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Connects to PostgreSQL when configured, otherwise keeps state in memory.
async fn connect_store(config: &DatabaseConfig) -> Result<Arc<dyn MembershipStore>> {
    let Some(url) = config.url() else {
        tracing::warn!("No database configured, membership state is kept in memory");
        return Ok(Arc::new(InMemoryMembershipStore::new()));
    };

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect(url)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    Ok(Arc::new(PostgresMemberStore::new(pool)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}
