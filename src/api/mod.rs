//! API handlers for the ops dashboard REST endpoints

pub mod health;
pub mod openapi;
pub mod sheets;

use std::time::Duration;

use axum::{http::Uri, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Dashboard data
        .route("/sheets", get(sheets::get_dashboard))
        .with_state(state.clone());

    // Path served to dashboards built against the unversioned API
    let legacy = Router::new()
        .route("/api/sheets", get(sheets::get_dashboard))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(legacy)
        .merge(openapi::create_openapi_router())
        .fallback(not_found)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
