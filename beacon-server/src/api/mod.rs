//! API Module
//!
//! HTTP API layer for the dashboard server.
//! Each submodule handles endpoints for a specific concern.

pub mod dashboard;
pub mod error;
pub mod health;
pub mod viewer;

use axum::{
    Router,
    http::{HeaderName, Method},
    routing::get,
};
use beacon_core::dto::dashboard::VIEWER_HEADER;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::DashboardFeed;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub feed: DashboardFeed,
}

/// Create the main API router with all endpoints
pub fn create_router(feed: DashboardFeed) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([HeaderName::from_static(VIEWER_HEADER)])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Dashboard endpoints
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/dashboard/stream", get(dashboard::stream_dashboard))
        .route(
            "/api/v1/dashboard/teams/{team}",
            get(dashboard::get_team_group),
        )
        // Add state and middleware
        .with_state(AppState { feed })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
