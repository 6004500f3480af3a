//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /r/{key}`  - Rotation redirect (public)
//! - `GET /health`   - Health check: DB, cache, click queue (public)
//! - `/api/*`        - REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer token on `/api`
//! - **Path normalization** - Trailing slash handling
use crate::api;
use crate::api::handlers::health::health_handler;
use crate::api::handlers::redirect::redirect_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer());

    let redirect_router =
        Router::new().route("/r/{key}", get(redirect_handler)).layer(rate_limit::layer());

    let router = Router::new()
        .merge(redirect_router)
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
