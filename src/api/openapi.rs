//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, sheets};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ops Dashboard API",
        version = "0.3.0",
        description = "Alert, misalignment and issue analytics computed from spreadsheets"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        health::readiness_check,
        sheets::get_dashboard,
    ),
    components(
        schemas(
            sheets::DashboardResponse,
            crate::models::summary::Summary,
            crate::models::summary::DualSummary,
            crate::models::summary::ResolutionStats,
            crate::models::dataset::DatasetKey,
            health::HealthResponse,
            health::ReadinessResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Aggregated dashboard data")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
