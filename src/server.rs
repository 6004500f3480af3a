//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum server lifecycle.

use crate::application::services::{AuthService, CacheInvalidator, LinkService, RedirectResolver};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::domain::retention::run_retention_worker;
use crate::infrastructure::cache::{NullCache, RedisCache, RotationCache};
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullCache fallback)
/// - Background click worker and click retention worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn RotationCache> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_op_timeout_ms).await {
            Ok(redis) => {
                tracing::info!("Rotation cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Rotation cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let pool_arc = Arc::new(pool);
    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool_arc.clone()));
    let click_repository: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool_arc));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, click_repository.clone()));
    tracing::info!("Click worker started");

    tokio::spawn(run_retention_worker(
        click_repository,
        config.click_retention_days,
        config.retention_interval_secs,
    ));
    tracing::info!(
        retention_days = config.click_retention_days,
        "Click retention worker started"
    );

    let resolver = Arc::new(RedirectResolver::new(
        link_repository.clone(),
        cache.clone(),
        config.rotation_cache_ttl,
    ));
    let invalidator = Arc::new(CacheInvalidator::new(cache.clone()));
    let link_service = Arc::new(LinkService::new(link_repository.clone(), invalidator));
    let auth_service = Arc::new(AuthService::new(
        &config.admin_token,
        config.token_signing_secret.clone(),
    ));

    let state = AppState {
        resolver,
        link_service,
        auth_service,
        links: link_repository,
        cache,
        click_sender: click_tx,
        behind_proxy: config.behind_proxy,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
