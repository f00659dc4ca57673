use std::sync::Arc;

use anyhow::{Context, Result};
use beacon_server::config::Config;
use beacon_server::service::{DashboardFeed, SystemClock};
use beacon_server::source::{FactSource, InMemoryFactSource, PgFactSource};
use beacon_server::{api, db};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beacon_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Beacon Server...");

    let config = Config::from_env()?;
    config.validate()?;

    let source = create_source(&config).await?;

    let feed = DashboardFeed::new(source, Arc::new(SystemClock), config.poll_interval);
    info!("Live feeds poll every {:?}", feed.interval());

    // Build router with all API endpoints
    let app = api::create_router(feed);

    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Beacon Server stopped");
    Ok(())
}

/// Picks the fact source: fixtures when configured, PostgreSQL otherwise
async fn create_source(config: &Config) -> Result<Arc<dyn FactSource>> {
    if let Some(path) = &config.fixtures {
        info!("Serving fixtures from {}", path.display());
        let source = InMemoryFactSource::from_json_file(path)?;
        return Ok(Arc::new(source));
    }

    info!("Connecting to database...");

    let pool = db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to create database pool")?;

    info!("Database connection pool created");

    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(Arc::new(PgFactSource::new(pool, config.source_timeout)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
