//! Health check endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::FetchErrorPolicy;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Current status of the service
    pub status: String,
    /// Version of the service
    pub version: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadinessResponse {
    /// "ready", or "unconfigured" when no Sheets API key is set
    pub status: String,
    pub version: String,
    pub api_key_configured: bool,
    /// Whether a failed dataset fetch fails the request
    pub fail_on_fetch_error: bool,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint (reports the Sheets client configuration)
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service readiness", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<crate::AppState>) -> Json<ReadinessResponse> {
    let sheets = &state.config.sheets;
    let api_key_configured = !sheets.api_key.is_empty();

    Json(ReadinessResponse {
        status: if api_key_configured { "ready" } else { "unconfigured" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_key_configured,
        fail_on_fetch_error: sheets.on_fetch_error == FetchErrorPolicy::Fail,
    })
}
